//! Error taxonomy and wire codes for the users service.

pub mod domain;
pub mod error_code;


pub use domain::{DomainError, ErrorKind};
pub use error_code::ErrorCode;
