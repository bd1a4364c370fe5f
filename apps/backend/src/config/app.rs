use super::db::DbConfig;
use super::{flag, number, text, ConfigError};

/// Top-level settings, built once in `main` and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Echo raw text of unclassified 5xx errors. Development only.
    pub debug_errors: bool,
    pub db: DbConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            debug_errors: false,
            db: DbConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            host: text(&lookup, "BACKEND_HOST", &defaults.host),
            port: number(&lookup, "BACKEND_PORT", defaults.port)?,
            debug_errors: flag(&lookup, "BACKEND_DEBUG_ERRORS", defaults.debug_errors)?,
            db: DbConfig::from_lookup(&lookup)?,
        })
    }

    /// Migrations are a database concern; the flag lives on [`DbConfig`].
    pub fn run_migrations(&self) -> bool {
        self.db.run_migrations
    }
}
