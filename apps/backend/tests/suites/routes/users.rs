use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_error_response;
use serde_json::{json, Value};

use crate::support::{create_test_app, sqlite_state};

#[actix_web::test]
async fn list_is_empty_array_on_fresh_database() {
    let app = create_test_app(sqlite_state().await).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn create_then_read_back() {
    let app = create_test_app(sqlite_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"id": "u1", "name": "Ada"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"id": "u1", "message": "user created"}));

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/users/u1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"ID": "u1", "Name": "Ada"}));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([{"ID": "u1", "Name": "Ada"}]));
}

#[actix_web::test]
async fn duplicate_create_is_conflict() {
    let app = create_test_app(sqlite_state().await).build().await;

    let first = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"id": "dup1", "name": "X"}))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

    let second = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"id": "dup1", "name": "X"}))
        .to_request();
    let resp = test::call_service(&app, second).await;
    let body = assert_error_response(resp, StatusCode::CONFLICT, "duplicate_entry", Some("dup1")).await;
    assert!(body.message.contains('X'), "{}", body.message);
    assert_eq!(body.code, None);
}

#[actix_web::test]
async fn missing_user_is_not_found() {
    let app = create_test_app(sqlite_state().await).build().await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/users/missing").to_request(),
    )
    .await;
    let body = assert_error_response(resp, StatusCode::NOT_FOUND, "not_found", None).await;
    assert_eq!(body.message, "User (ID: missing) not found");
}

#[actix_web::test]
async fn blank_fields_are_invalid_input() {
    let app = create_test_app(sqlite_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"id": "u2", "name": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_error_response(resp, StatusCode::BAD_REQUEST, "invalid_input", None).await;
    assert_eq!(body.message, "Field name: must not be empty");

    // Missing fields take the same path as empty ones.
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(
        resp,
        StatusCode::BAD_REQUEST,
        "invalid_input",
        Some("Field id"),
    )
    .await;
}
