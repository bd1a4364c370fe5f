//! Error-mapping middleware.
//!
//! Sits between the route handlers and the wire. When the inner service
//! produced an error (attached to the response or returned as `Err`), the
//! error is classified into a status and a JSON body, 5xx causes are written
//! to the operational log, and the response is rebuilt. Successful responses
//! pass through untouched.
//!
//! A mapped response carries the [`ErrorMapped`] extension. Responses that
//! already carry it are never rewritten again, so stacking this middleware
//! (app-wide plus on a scope) is harmless.

use std::fmt;
use std::future::{ready, Ready};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpResponse};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use crate::error::{AppError, Classification};
use crate::errors::ErrorCode;
use crate::logging::pii::redact_dsn;
use crate::trace_ctx;

/// Response extension marking a response as already mapped. Holds the wire
/// code so outer layers can log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMapped(pub ErrorCode);

/// Already classified failure, returned when the inner service failed with
/// `Err` rather than an error response.
///
/// The request is owned by the inner service at that point, so the mapped
/// response is rendered by the server from this error.
#[derive(Debug)]
pub struct MappedError(Classification);

impl MappedError {
    pub fn code(&self) -> ErrorCode {
        self.0.code
    }
}

impl fmt::Display for MappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.message)
    }
}

impl ResponseError for MappedError {
    fn status_code(&self) -> StatusCode {
        self.0.status
    }

    fn error_response(&self) -> HttpResponse {
        marked(self.0.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorMapper {
    debug_errors: bool,
}

impl ErrorMapper {
    /// `debug_errors` lets unclassified errors echo their raw text. Keep it
    /// off outside development.
    pub fn new(debug_errors: bool) -> Self {
        Self { debug_errors }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorMapper
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = ErrorMapperMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorMapperMiddleware {
            service,
            debug_errors: self.debug_errors,
        }))
    }
}

pub struct ErrorMapperMiddleware<S> {
    service: S,
    debug_errors: bool,
}

impl<S, B> Service<ServiceRequest> for ErrorMapperMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let debug_errors = self.debug_errors;
        // The router needs sole ownership of the request; hold no handle to it here.
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = match fut.await {
                Ok(res) => res,
                Err(err) if err.as_error::<MappedError>().is_some() => return Err(err),
                Err(err) => return Err(MappedError(classify_and_log(&err, debug_errors)).into()),
            };

            if res.response().extensions().get::<ErrorMapped>().is_some() {
                return Ok(res.map_into_left_body());
            }

            let mapped = res
                .response()
                .error()
                .map(|err| map_error(err, debug_errors));

            match mapped {
                None => Ok(res.map_into_left_body()),
                Some(response) => {
                    let (req, _) = res.into_parts();
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                }
            }
        })
    }
}

/// Classify an actix error, log it, and build the marked response.
pub fn map_error(err: &ActixError, debug_errors: bool) -> HttpResponse {
    marked(classify_and_log(err, debug_errors))
}

/// Errors that are not an [`AppError`] were raised by the framework itself
/// and are classified by the status they carry.
fn classify_and_log(err: &ActixError, debug_errors: bool) -> Classification {
    let framework;
    let app_err = match err.as_error::<AppError>() {
        Some(app_err) => app_err,
        None => {
            framework = AppError::http(err.as_response_error().status_code(), err.to_string());
            &framework
        }
    };

    let classification = app_err.classify(debug_errors);
    log_mapped(app_err, &classification);
    classification
}

fn marked(classification: Classification) -> HttpResponse {
    let code = classification.code;
    let mut response = classification.into_response();
    response.extensions_mut().insert(ErrorMapped(code));
    response
}

fn log_mapped(err: &AppError, classification: &Classification) {
    let trace_id = trace_ctx::trace_id();
    let status = classification.status.as_u16();

    if classification.is_server_error() {
        // Connection targets are masked at construction; this catches any
        // connection string that arrived inside a cause.
        error!(
            trace_id = %trace_id,
            status,
            error_code = %classification.code,
            error = %redact_dsn(&err.chain()),
            "request failed"
        );
    } else {
        debug!(
            trace_id = %trace_id,
            status,
            error_code = %classification.code,
            error = %err,
            "request rejected"
        );
    }
}
