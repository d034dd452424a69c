//! Application configuration
//!
//! Settings come from the process environment (after `.env` is loaded by
//! `dotenvy`) through the `config` crate. Keys carry the `COACH_PLANNING`
//! prefix and `__` separates nesting levels:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `COACH_PLANNING__SERVER__PORT` | `server.port` |
//! | `COACH_PLANNING__DATABASE__URL` | `database.url` (required) |
//! | `COACH_PLANNING__SWEEPER__INTERVAL_SECS` | `sweeper.interval_secs` |
//!
//! ```no_run
//! use coach_planning::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//! println!("listening on {}", config.server.socket_addr()?);
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
mod server;
mod sweeper;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use sweeper::SweeperConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "COACH_PLANNING";

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub sweeper: SweeperConfig,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` when a required key is missing or a
    /// value does not parse into its field type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(environment())
    }

    fn from_source(source: config::Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Check every section's semantic constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.sweeper.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator("__")
}
