use std::error::Error as StdError;

use actix_web::error::ResponseError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::domain::{BoxError, DomainError, ErrorKind};
use crate::errors::ErrorCode;

/// Generic text every redacted 5xx body carries.
pub const INTERNAL_MESSAGE: &str = "an internal error occurred";

/// Body used when the JSON error body itself cannot be produced.
pub const FALLBACK_BODY: &str = "internal server error";

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Classified failure from the service or repository layers.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Failure raised by the HTTP layer itself (bad body, unknown route,
    /// wrong method, any actix error that is not ours).
    #[error("http error {status}: {detail}")]
    Http { status: StatusCode, detail: String },

    /// Anything nobody classified.
    #[error("{0}")]
    Unclassified(BoxError),
}

/// Result of classifying an [`AppError`] for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: StatusCode,
    pub code: ErrorCode,
    pub message: String,
    pub detail_code: Option<String>,
}

impl Classification {
    fn echo(status: StatusCode, code: ErrorCode, message: String) -> Self {
        Self {
            status,
            code,
            message,
            detail_code: None,
        }
    }

    fn redacted() -> Self {
        Self::echo(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            INTERNAL_MESSAGE.to_string(),
        )
    }

    fn unclassified(raw: String, debug_errors: bool) -> Self {
        if debug_errors {
            Self::echo(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                raw,
            )
        } else {
            Self::redacted()
        }
    }

    fn http(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => {
                Self::echo(status, ErrorCode::BadRequest, "bad request".to_string())
            }
            StatusCode::NOT_FOUND => Self::echo(
                status,
                ErrorCode::NotFound,
                "resource not found".to_string(),
            ),
            StatusCode::METHOD_NOT_ALLOWED => Self::echo(
                status,
                ErrorCode::MethodNotAllowed,
                "method not allowed".to_string(),
            ),
            other => Self {
                status: other,
                code: ErrorCode::HttpError,
                message: other.canonical_reason().unwrap_or("http error").to_string(),
                detail_code: Some(other.as_u16().to_string()),
            },
        }
    }

    /// True when the branch must reach the operational log at error level.
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code.as_str().to_string(),
            message: self.message.clone(),
            code: self.detail_code.clone(),
        }
    }

    /// Render the JSON response. Never fails: if the body cannot be
    /// serialized a fixed plain-text 500 is returned instead.
    pub fn into_response(self) -> HttpResponse {
        match serde_json::to_vec(&self.body()) {
            Ok(bytes) => HttpResponse::build(self.status)
                .content_type(ContentType::json())
                .body(bytes),
            Err(_) => fallback_response(),
        }
    }
}

/// Minimal response used when nothing better can be produced.
pub fn fallback_response() -> HttpResponse {
    HttpResponse::InternalServerError()
        .content_type(ContentType::plaintext())
        .body(FALLBACK_BODY)
}

impl AppError {
    pub fn http(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::Http {
            status,
            detail: detail.into(),
        }
    }

    pub fn unclassified(err: impl Into<BoxError>) -> Self {
        Self::Unclassified(err.into())
    }

    /// Map this error to a wire status, code and message.
    ///
    /// Persistence kinds are always redacted. `debug_errors` only affects
    /// the unclassified branch (domain `Internal` and `Unclassified`).
    pub fn classify(&self, debug_errors: bool) -> Classification {
        match self {
            AppError::Domain(err) => match err.kind() {
                ErrorKind::NotFound => Classification::echo(
                    StatusCode::NOT_FOUND,
                    ErrorCode::NotFound,
                    err.to_string(),
                ),
                ErrorKind::Duplicated => Classification::echo(
                    StatusCode::CONFLICT,
                    ErrorCode::DuplicateEntry,
                    err.to_string(),
                ),
                ErrorKind::InvalidInput => Classification::echo(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidInput,
                    err.to_string(),
                ),
                ErrorKind::Unauthorized => Classification::echo(
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    err.to_string(),
                ),
                ErrorKind::Database
                | ErrorKind::Connection
                | ErrorKind::Transaction
                | ErrorKind::Query => Classification::redacted(),
                ErrorKind::Internal => Classification::unclassified(err.to_string(), debug_errors),
            },
            AppError::Http { status, .. } => Classification::http(*status),
            AppError::Unclassified(err) => Classification::unclassified(err.to_string(), debug_errors),
        }
    }

    /// Full text of the error and every cause, for the operational log.
    pub fn chain(&self) -> String {
        match self {
            AppError::Domain(err) => error_chain(err),
            AppError::Http { status, detail } => format!("{status}: {detail}"),
            AppError::Unclassified(err) => error_chain(&**err),
        }
    }
}

/// Joins an error and its sources with `": "`.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(cause) = cur {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        cur = cause.source();
    }
    out
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.classify(false).status
    }

    fn error_response(&self) -> HttpResponse {
        self.classify(false).into_response()
    }
}
