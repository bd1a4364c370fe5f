use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::LogCapture;
use serde_json::Value;

use crate::common::request_id;
use crate::support::repos::failing_state;
use crate::support::{create_test_app, sqlite_state};

const CAUSE: &str = "lost connection to server during query";

#[actix_web::test]
async fn server_error_is_logged_once_with_its_cause() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    let app = create_test_app(failing_state(CAUSE)).build().await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let trace_id = request_id(&resp);
    let _ = test::read_body(resp).await;

    // StructuredLogger also writes an error-level request record, but only
    // the mapper's record carries the cause.
    let records = capture.matching("ERROR", CAUSE);
    assert_eq!(records.len(), 1, "{records:?}");

    let fields = &records[0]["fields"];
    assert_eq!(fields["message"], "request failed");
    assert_eq!(fields["trace_id"], Value::String(trace_id));
    assert_eq!(fields["error_code"], "internal_server_error");
    let logged = fields["error"].as_str().unwrap_or_default();
    assert!(logged.contains("SELECT id, name FROM users"), "{logged}");
}

#[actix_web::test]
async fn unclassified_error_is_logged_once() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    let app = create_test_app(failing_state(CAUSE)).build().await;
    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/users/u1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let _ = test::read_body(resp).await;

    assert_eq!(capture.count("ERROR", CAUSE), 1);
}

#[actix_web::test]
async fn connection_error_log_masks_password() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    let app = create_test_app(failing_state(CAUSE)).build().await;
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(serde_json::json!({"id": "u1", "name": "Ada"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let _ = test::read_body(resp).await;

    assert_eq!(capture.count("ERROR", CAUSE), 1);
    assert!(capture.contains("localhost:13306"));
    assert!(!capture.contains("dddpass"));
}

#[actix_web::test]
async fn client_errors_are_not_logged_at_error_level() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    let app = create_test_app(sqlite_state().await).build().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/users/missing").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let _ = test::read_body(resp).await;

    assert_eq!(capture.count("ERROR", "request failed"), 0);
    assert_eq!(capture.count("DEBUG", "request rejected"), 1);
}

#[actix_web::test]
async fn long_identifiers_in_the_cause_are_logged_verbatim() {
    const REPLICATION_CAUSE: &str = "timeout waiting for ReplicationCoordinator";

    let capture = LogCapture::new();
    let _guard = capture.install();

    let app = create_test_app(failing_state(REPLICATION_CAUSE)).build().await;
    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/users/u1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let _ = test::read_body(resp).await;

    assert_eq!(capture.count("ERROR", REPLICATION_CAUSE), 1);
    assert!(!capture.contains("[REDACTED_TOKEN]"));
}

#[actix_web::test]
async fn request_record_carries_the_mapped_code() {
    let capture = LogCapture::new();
    let _guard = capture.install();

    let app = create_test_app(sqlite_state().await).build().await;
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/users/missing").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let _ = test::read_body(resp).await;

    let records = capture.matching("WARN", "request_completed");
    assert_eq!(records.len(), 1, "{records:?}");
    assert_eq!(records[0]["fields"]["error_code"], "not_found");
    assert_eq!(records[0]["fields"]["http.status_code"], 404);
}
