use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use super::{flag, number, text, ConfigError};
use crate::logging::pii::redact_dsn;

/// Lifetime of a pooled connection before it is recycled.
pub const CONN_MAX_LIFETIME: Duration = Duration::from_secs(5 * 60);

/// How long a request waits for a pooled connection.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Full URL override, e.g. `sqlite::memory:`. Wins over the parts above.
    pub url_override: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: "ddduser".to_string(),
            password: "dddpass".to_string(),
            host: "localhost".to_string(),
            port: 13306,
            name: "go_ddd".to_string(),
            url_override: None,
            max_connections: 25,
            run_migrations: false,
        }
    }
}

impl DbConfig {
    /// Load from `DB_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            user: text(&lookup, "DB_USER", &defaults.user),
            password: text(&lookup, "DB_PASSWORD", &defaults.password),
            host: text(&lookup, "DB_HOST", &defaults.host),
            port: number(&lookup, "DB_PORT", defaults.port)?,
            name: text(&lookup, "DB_NAME", &defaults.name),
            url_override: lookup("DB_URL").filter(|v| !v.trim().is_empty()),
            max_connections: number(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            run_migrations: flag(&lookup, "DB_RUN_MIGRATIONS", defaults.run_migrations)?,
        })
    }

    /// Connection URL including credentials. Never log this.
    ///
    /// User and password are percent-encoded so reserved characters in them
    /// cannot move the host boundary.
    pub fn url(&self) -> String {
        match &self.url_override {
            Some(url) => url.clone(),
            None => format!(
                "mysql://{}:{}@{}:{}/{}",
                utf8_percent_encode(&self.user, NON_ALPHANUMERIC),
                utf8_percent_encode(&self.password, NON_ALPHANUMERIC),
                self.host,
                self.port,
                self.name
            ),
        }
    }

    /// Connection URL with the password masked.
    pub fn redacted_url(&self) -> String {
        redact_dsn(&self.url())
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}
