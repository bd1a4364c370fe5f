//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert every `sea_orm::DbErr` here. Uniqueness violations are
//! detected separately with [`is_unique_violation`] because only the adapter
//! knows which record it was writing.

use sea_orm::{DbErr, SqlErr};
use tracing::{debug, warn};

use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// What the adapter was doing when the error happened.
#[derive(Debug, Clone, Copy)]
pub struct DbCall<'a> {
    /// Short verb, e.g. `"insert"`.
    pub operation: &'a str,
    pub table: &'a str,
    /// Statement text without bound values.
    pub query: &'a str,
    /// Redacted connection target reported on connection failures.
    pub dsn: &'a str,
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(&format!("SQLSTATE({code})")) || msg.contains(&format!("code: {code}"))
}

/// True when `e` is a uniqueness violation on any supported backend.
///
/// SeaORM's structured detection is tried first; the string checks cover
/// drivers that only surface the message (MySQL 1062, SQLite, Postgres 23505).
pub fn is_unique_violation(e: &DbErr) -> bool {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }

    let msg = e.to_string();
    msg.contains("Duplicate entry")
        || msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key value violates unique constraint")
        || mentions_sqlstate(&msg, "23505")
}

fn is_connection_failure(e: &DbErr) -> bool {
    matches!(e, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// Translate a `DbErr` into a persistence `DomainError`.
///
/// Connection and pool failures become `Connection`, statement failures
/// become `Query`, and whatever is left (custom errors, type conversions)
/// becomes `Database`. The raw driver error stays attached as the source.
pub fn map_db_err(e: DbErr, call: DbCall<'_>) -> DomainError {
    let trace_id = trace_ctx::trace_id();
    let raw = e.to_string();

    if is_connection_failure(&e) {
        warn!(trace_id = %trace_id, table = call.table, raw_error = %Redacted(&raw), "Database unavailable");
        return DomainError::connection(call.dsn, e);
    }

    match e {
        DbErr::Exec(_) | DbErr::Query(_) | DbErr::RecordNotInserted | DbErr::RecordNotUpdated => {
            debug!(trace_id = %trace_id, query = call.query, raw_error = %Redacted(&raw), "Statement failed");
            DomainError::query(call.query, e)
        }
        other => {
            debug!(trace_id = %trace_id, operation = call.operation, table = call.table, raw_error = %Redacted(&raw), "Database operation failed");
            DomainError::database(call.operation, call.table, other)
        }
    }
}
