use migration::migrate_up;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{error, info};

use crate::config::db::{DbConfig, ACQUIRE_TIMEOUT, CONN_MAX_LIFETIME};
use crate::errors::domain::DomainError;

fn connect_options(cfg: &DbConfig) -> ConnectOptions {
    let url = cfg.url();
    let mut opt = ConnectOptions::new(url.clone());

    opt.acquire_timeout(ACQUIRE_TIMEOUT).sqlx_logging(false);

    // In-memory SQLite lives only as long as its connection: keep exactly
    // one and never recycle it.
    if is_sqlite(&url) {
        opt.min_connections(1).max_connections(1);
    } else {
        opt.min_connections(0)
            .max_connections(cfg.max_connections)
            .max_lifetime(CONN_MAX_LIFETIME);
    }
    opt
}

fn is_sqlite(url: &str) -> bool {
    url.starts_with("sqlite")
}

/// Open the pool, verify it with a ping and run migrations when enabled.
///
/// Every failure comes back as `DomainError::Connection` carrying the
/// redacted URL.
pub async fn connect_db(cfg: &DbConfig) -> Result<DatabaseConnection, DomainError> {
    let target = cfg.redacted_url();

    let db = Database::connect(connect_options(cfg))
        .await
        .map_err(|e| {
            error!(db = %target, "database connect failed");
            DomainError::connection(&target, e)
        })?;

    db.ping().await.map_err(|e| {
        error!(db = %target, "database ping failed");
        DomainError::connection(&target, e)
    })?;

    info!(db = %target, max_connections = cfg.max_connections, "database connected");

    if cfg.run_migrations {
        migrate_up(&db)
            .await
            .map_err(|e| DomainError::connection(&target, e))?;
    }

    Ok(db)
}
