pub mod error_logging;
pub mod error_shape;
pub mod health;
pub mod users;
