#![allow(dead_code)]

pub mod repos;

pub use app_builder::{create_test_app, sqlite_state};
