//! Backend test support utilities
//!
//! Shared by the backend's unit and integration tests: logging
//! initialization, error-body assertions and a log capture for asserting
//! what reached the operational log.

pub mod error_body;
pub mod log_capture;
pub mod logging;

pub use error_body::{assert_error_body, assert_error_response, ErrorBodyLike};
pub use log_capture::LogCapture;
