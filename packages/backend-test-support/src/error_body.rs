//! Error-body test helpers
//!
//! Assert the `{error, message, code?}` contract without depending on
//! backend types.

use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Local mirror of the backend's error body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorBodyLike {
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Assert status and body of an error response, returning the parsed body
/// for further checks.
///
/// `message_contains` is a substring check; pass the full text for an
/// exact-enough match.
pub fn assert_error_body(
    status: StatusCode,
    body: &[u8],
    expected_status: StatusCode,
    expected_error: &str,
    message_contains: Option<&str>,
) -> ErrorBodyLike {
    assert_eq!(status, expected_status, "unexpected status");

    let text = String::from_utf8(body.to_vec()).expect("error body should be valid UTF-8");
    let parsed: ErrorBodyLike = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("error body should be JSON ({e}): {text}"));

    assert_eq!(parsed.error, expected_error, "unexpected error code in {text}");
    if let Some(needle) = message_contains {
        assert!(
            parsed.message.contains(needle),
            "message {:?} should contain {needle:?}",
            parsed.message
        );
    }
    parsed
}

/// Same as [`assert_error_body`] for a full test-service response; also
/// checks the JSON content type.
pub async fn assert_error_response<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_error: &str,
    message_contains: Option<&str>,
) -> ErrorBodyLike
where
    B: actix_web::body::MessageBody,
{
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "error responses are JSON, got {content_type:?}"
    );

    let body = actix_web::test::read_body(resp).await;
    assert_error_body(status, &body, expected_status, expected_error, message_contains)
}
