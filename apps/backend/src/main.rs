use std::process::ExitCode;

use actix_web::{web, App, HttpServer};
use tracing::{error, info};
use users_backend::config::AppConfig;
use users_backend::infra::db::connect_db;
use users_backend::logging::pii::Redacted;
use users_backend::middleware::{ErrorMapper, RequestTrace, StructuredLogger};
use users_backend::routes;
use users_backend::state::AppState;
use users_backend::telemetry;

#[actix_web::main]
async fn main() -> ExitCode {
    if let Err(e) = telemetry::init_tracing() {
        eprintln!("failed to install tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let db = match connect_db(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %Redacted(&users_backend::error::error_chain(&e)), "failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    let data = web::Data::new(AppState::from_db(db, config.db.redacted_url()));
    let debug_errors = config.debug_errors;

    info!(
        host = %config.host,
        port = config.port,
        debug_errors,
        run_migrations = config.run_migrations(),
        "starting users backend"
    );

    // Last wrap runs first: RequestTrace opens the trace scope, then the
    // logger, then the error mapper closest to the handlers.
    let server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorMapper::new(debug_errors))
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port));

    let server = match server {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, host = %config.host, port = config.port, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    match server.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "server stopped with an error");
            ExitCode::FAILURE
        }
    }
}
