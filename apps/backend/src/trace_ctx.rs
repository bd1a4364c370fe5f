//! Task-local request trace id.
//!
//! `RequestTrace` opens the scope for each request; anything running inside
//! the request future (handlers, services, the error mapper) can read the id
//! for its log records without threading it through call signatures.

use std::future::Future;

use tokio::task_local;

/// Value reported outside of any request scope.
pub const UNKNOWN_TRACE_ID: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or [`UNKNOWN_TRACE_ID`].
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(String::clone)
        .unwrap_or_else(|_| UNKNOWN_TRACE_ID.to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
