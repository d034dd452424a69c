//! PostgreSQL adapters - Database implementations for the planning ports.
//!
//! - `PostgresPlanningReader` - list-by-client reads of plannings with sessions
//! - `PostgresSessionStore` - keyset-paged expirable selection and conditional writes
//! - `connect` - pool construction from [`DatabaseConfig`], with optional migrations

mod planning_reader;
mod session_store;

pub use planning_reader::PostgresPlanningReader;
pub use session_store::PostgresSessionStore;

use sqlx::{PgPool, Row};

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode, SessionStatus};

/// Create a connection pool and, if configured, run pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = config
        .pool_options()
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database("connect to database", e))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database("run migrations", e))?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

pub(crate) fn str_to_session_status(s: &str) -> Result<SessionStatus, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid session status: {}", s),
        )
    })
}
