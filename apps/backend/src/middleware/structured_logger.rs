use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::error_mapper::{ErrorMapped, MappedError};
use super::request_trace::TraceId;

/// One `request_completed` record per request, levelled by status class.
///
/// Wrap it outside [`ErrorMapper`](super::ErrorMapper): mapped failures then
/// carry their wire code, which lands in the record as `error_code`.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let trace_id = req
            .extensions()
            .get::<TraceId>()
            .map(|t| t.0.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, error_code) = match &result {
                Ok(res) => (
                    res.status(),
                    res.response()
                        .extensions()
                        .get::<ErrorMapped>()
                        .map(|mapped| mapped.0.as_str()),
                ),
                Err(err) => (
                    err.as_response_error().status_code(),
                    err.as_error::<MappedError>().map(|mapped| mapped.code().as_str()),
                ),
            };
            let completed = Completed {
                status,
                method: &method,
                path: &path,
                trace_id: &trace_id,
                error_code,
                elapsed_us: u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            };
            completed.log();

            result
        })
    }
}

struct Completed<'a> {
    status: StatusCode,
    method: &'a str,
    path: &'a str,
    trace_id: &'a str,
    error_code: Option<&'static str>,
    elapsed_us: u64,
}

impl Completed<'_> {
    fn log(&self) {
        let status_code = self.status.as_u16();
        let (method, path, trace_id) = (self.method, self.path, self.trace_id);
        let (error_code, elapsed_us) = (self.error_code, self.elapsed_us);
        if self.status.is_server_error() {
            error!(http.method = %method, url.path = %path, http.status_code = status_code, error_code, duration_us = elapsed_us, trace_id = %trace_id, "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %method, url.path = %path, http.status_code = status_code, error_code, duration_us = elapsed_us, trace_id = %trace_id, "request_completed");
        } else {
            info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us = elapsed_us, trace_id = %trace_id, "request_completed");
        }
    }
}
