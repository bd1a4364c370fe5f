#![cfg(test)]

//! Test logging for unit tests; integration tests call the same shared init.

pub fn init() {
    backend_test_support::logging::init();
}
