//! PostgreSQL pool settings

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// Connection settings for the planning store.
///
/// `url` has no default and must be supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Connections kept open while idle
    #[serde(default = "DatabaseConfig::default_min_connections")]
    pub min_connections: u32,

    /// Upper bound on pool size
    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection
    #[serde(default = "DatabaseConfig::default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// Seconds before an idle connection is closed
    #[serde(default = "DatabaseConfig::default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Apply embedded migrations on startup.
    #[serde(default = "DatabaseConfig::default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Settings for `url` with every other field at its default.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_connections: Self::default_min_connections(),
            max_connections: Self::default_max_connections(),
            acquire_timeout_secs: Self::default_acquire_timeout_secs(),
            idle_timeout_secs: Self::default_idle_timeout_secs(),
            run_migrations: Self::default_run_migrations(),
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Pool builder carrying the size and timeout settings.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(self.min_connections)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout())
            .idle_timeout(self.idle_timeout())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("database.url"));
        }
        let scheme_ok = ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        if !scheme_ok {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        Ok(())
    }

    fn default_min_connections() -> u32 {
        2
    }

    fn default_max_connections() -> u32 {
        10
    }

    fn default_acquire_timeout_secs() -> u64 {
        5
    }

    fn default_idle_timeout_secs() -> u64 {
        600
    }

    fn default_run_migrations() -> bool {
        true
    }
}
