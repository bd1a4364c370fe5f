use actix_web::test;

use crate::support::{create_test_app, sqlite_state};

#[actix_web::test]
async fn test_health_endpoint() {
    let app = create_test_app(sqlite_state().await).build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body = test::read_body(resp).await;
    assert_eq!(body, "ok");
}
