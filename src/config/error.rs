//! Configuration error types

use thiserror::Error;

/// Failure to build [`super::AppConfig`] from its sources.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value that breaks a semantic constraint.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidHost(String),

    #[error("Port must be non-zero")]
    InvalidPort,

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Database URL must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Sweeper page size must be between 1 and 10000")]
    InvalidPageSize,

    #[error("Sweeper store timeout must be positive")]
    InvalidStoreTimeout,

    #[error("Sweeper pass timeout must be positive")]
    InvalidPassTimeout,
}
