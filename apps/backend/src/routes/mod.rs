use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{web, Error as ActixError, HttpRequest, HttpResponse, ResponseError};

use crate::error::AppError;

pub mod health;
pub mod users;

/// Body extraction failures keep the status actix chose for them (400 for
/// malformed JSON) and go through the error mapper like everything else.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> ActixError {
    AppError::http(err.status_code(), err.to_string()).into()
}

async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::http(StatusCode::NOT_FOUND, req.path().to_string()))
}

/// Register every route plus the JSON and fallback handlers.
///
/// Used by `main.rs` and by tests, so both see the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // User routes: /users/**
    cfg.service(web::scope("/users").configure(users::configure_routes));

    cfg.default_service(web::to(not_found));
}
