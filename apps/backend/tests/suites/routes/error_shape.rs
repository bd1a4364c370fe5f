use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::assert_error_response;

use crate::common::request_id;
use crate::support::repos::failing_state;
use crate::support::{create_test_app, sqlite_state};

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = create_test_app(sqlite_state().await).build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(ContentType::json())
        .set_payload("{\"id\": \"u1\", \"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body = assert_error_response(resp, StatusCode::BAD_REQUEST, "bad_request", None).await;
    assert_eq!(body.message, "bad request");
}

#[actix_web::test]
async fn unknown_route_is_not_found() {
    let app = create_test_app(sqlite_state().await).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    let body = assert_error_response(resp, StatusCode::NOT_FOUND, "not_found", None).await;
    assert_eq!(body.message, "resource not found");
}

#[actix_web::test]
async fn wrong_method_is_method_not_allowed() {
    let app = create_test_app(sqlite_state().await).build().await;

    let resp = test::call_service(&app, test::TestRequest::delete().uri("/users").to_request()).await;
    let body =
        assert_error_response(resp, StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed", None)
            .await;
    assert_eq!(body.message, "method not allowed");

    let resp =
        test::call_service(&app, test::TestRequest::put().uri("/users/u1").to_request()).await;
    assert_error_response(resp, StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed", None).await;
}

#[actix_web::test]
async fn persistence_details_never_reach_the_body() {
    let app = create_test_app(failing_state("Access denied for user 'ddduser'@'10.0.0.7'"))
        .with_debug_errors(true)
        .build()
        .await;

    let list = test::TestRequest::get().uri("/users").to_request();
    let create = test::TestRequest::post()
        .uri("/users")
        .set_json(serde_json::json!({"id": "u1", "name": "Ada"}))
        .to_request();

    for req in [list, create] {
        let resp = test::call_service(&app, req).await;
        let body = assert_error_response(
            resp,
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_server_error",
            None,
        )
        .await;
        assert_eq!(body.message, "an internal error occurred");
        assert!(!body.message.contains("ddduser"));
        assert!(!body.message.contains("dddpass"));
    }
}

#[actix_web::test]
async fn unclassified_error_is_generic_by_default() {
    let app = create_test_app(failing_state("cache warmup incomplete"))
        .build()
        .await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/users/u1").to_request()).await;
    let body = assert_error_response(
        resp,
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_server_error",
        None,
    )
    .await;
    assert_eq!(body.message, "an internal error occurred");
}

#[actix_web::test]
async fn debug_flag_echoes_unclassified_text() {
    let app = create_test_app(failing_state("cache warmup incomplete"))
        .with_debug_errors(true)
        .build()
        .await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/users/u1").to_request()).await;
    let body = assert_error_response(
        resp,
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_server_error",
        None,
    )
    .await;
    assert_eq!(body.message, "internal error: cache warmup incomplete");
}

#[actix_web::test]
async fn error_responses_carry_request_id() {
    let app = create_test_app(sqlite_state().await).build().await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/users/ghost").to_request()).await;
    assert!(!request_id(&resp).is_empty());
    assert_error_response(resp, StatusCode::NOT_FOUND, "not_found", Some("ghost")).await;
}
