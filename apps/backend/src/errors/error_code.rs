//! Wire-level error codes for the users API.
//!
//! Every error response carries exactly one of these in its `error` field.
//! Clients branch on these strings, so they never change once published.
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Lookup failed (domain not-found or unknown route)
    NotFound,
    /// Uniqueness violation on create
    DuplicateEntry,
    /// Input failed a business rule
    InvalidInput,
    /// Caller lacks permission
    Unauthorized,
    /// Malformed request rejected by the HTTP layer
    BadRequest,
    /// Route exists but not for this method
    MethodNotAllowed,
    /// Any other HTTP-layer status passed through
    HttpError,
    /// Everything the client must not see the details of
    InternalServerError,
}

impl ErrorCode {
    /// Returns the canonical snake_case string that appears in responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::DuplicateEntry => "duplicate_entry",
            Self::InvalidInput => "invalid_input",
            Self::Unauthorized => "unauthorized",
            Self::BadRequest => "bad_request",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::HttpError => "http_error",
            Self::InternalServerError => "internal_server_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
