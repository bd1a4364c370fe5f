//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.
//!
//! Each variant renders a log-friendly message through `Display`. Persistence
//! variants keep the underlying cause reachable through `Error::source()` but
//! never include it in their own text.

use std::error::Error as StdError;

use thiserror::Error;

use crate::logging::pii::redact_dsn;

/// Boxed underlying cause carried by persistence errors.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Discriminant of a [`DomainError`], comparable without looking at payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Duplicated,
    Unauthorized,
    Internal,
    Database,
    Connection,
    Transaction,
    Query,
}

impl ErrorKind {
    /// True for the kinds raised by the persistence layer.
    pub const fn is_persistence(self) -> bool {
        matches!(
            self,
            Self::Database | Self::Connection | Self::Transaction | Self::Query
        )
    }
}

/// Central domain error type
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Lookup by identity failed
    #[error("{entity} (ID: {id}) not found")]
    NotFound { entity: String, id: String },

    /// Input failed a business rule
    #[error("Field {field}: {message}")]
    Validation { field: String, message: String },

    /// Uniqueness violation on create
    #[error("duplicate entry: ID={id}, Name={name}")]
    Duplicated { id: String, name: String },

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error: {detail}")]
    Internal { detail: String },

    /// Generic persistence failure on `table`
    #[error("database error: operation={operation}, table={table}")]
    Database {
        operation: String,
        table: String,
        #[source]
        source: BoxError,
    },

    /// Pool or connection failure. `dsn` is stored credential-free.
    #[error("database connection error ({dsn})")]
    Connection {
        dsn: String,
        #[source]
        source: BoxError,
    },

    /// begin / commit / rollback failure
    #[error("transaction error ({operation})")]
    Transaction {
        operation: String,
        #[source]
        source: BoxError,
    },

    /// Statement execution failure
    #[error("query error: {query}")]
    Query {
        query: String,
        #[source]
        source: BoxError,
    },
}

impl DomainError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn duplicated(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Duplicated {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn database(
        operation: impl Into<String>,
        table: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Database {
            operation: operation.into(),
            table: table.into(),
            source: source.into(),
        }
    }

    /// Build a connection error. Credentials in `dsn` are masked before the
    /// value is stored, so neither `Display` nor `Debug` can leak them.
    pub fn connection(dsn: &str, source: impl Into<BoxError>) -> Self {
        Self::Connection {
            dsn: redact_dsn(dsn),
            source: source.into(),
        }
    }

    pub fn transaction(operation: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source: source.into(),
        }
    }

    pub fn query(query: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Query {
            query: query.into(),
            source: source.into(),
        }
    }

    /// The discriminant of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::InvalidInput,
            Self::Duplicated { .. } => ErrorKind::Duplicated,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Internal { .. } => ErrorKind::Internal,
            Self::Database { .. } => ErrorKind::Database,
            Self::Connection { .. } => ErrorKind::Connection,
            Self::Transaction { .. } => ErrorKind::Transaction,
            Self::Query { .. } => ErrorKind::Query,
        }
    }

    /// Sentinel-style comparison against a kind.
    ///
    /// `ErrorKind::Database` is the umbrella marker: every persistence
    /// variant answers true for it, in addition to its own kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        let own = self.kind();
        own == kind || (kind == ErrorKind::Database && own.is_persistence())
    }

    /// `(entity, id)` of a not-found error.
    pub fn not_found_parts(&self) -> Option<(&str, &str)> {
        match self {
            Self::NotFound { entity, id } => Some((entity, id)),
            _ => None,
        }
    }

    /// `(id, name)` of a duplicate-entry error.
    pub fn duplicated_parts(&self) -> Option<(&str, &str)> {
        match self {
            Self::Duplicated { id, name } => Some((id, name)),
            _ => None,
        }
    }

    /// `(field, message)` of a validation error.
    pub fn validation_parts(&self) -> Option<(&str, &str)> {
        match self {
            Self::Validation { field, message } => Some((field, message)),
            _ => None,
        }
    }
}
