pub mod error_mapper;
pub mod request_trace;
pub mod structured_logger;

pub use error_mapper::{ErrorMapped, ErrorMapper, MappedError};
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
