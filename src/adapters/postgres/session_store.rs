//! PostgreSQL implementation of SessionStore.
//!
//! Expiration never issues a set-based update; each row is moved with its
//! own `UPDATE ... WHERE id = $1 AND status = $2`, which PostgreSQL
//! evaluates atomically against the committed row.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ErrorCode, SessionStatus, StateMachine, Timestamp, TrainingSessionId,
};
use crate::domain::planning::{SweepCursor, TrainingSession};
use crate::ports::SessionStore;

use super::planning_reader::row_to_session;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn find_expirable(
        &self,
        cutoff: Timestamp,
        after: Option<SweepCursor>,
        limit: u32,
    ) -> Result<Vec<TrainingSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, planning_id, scheduled_at, status, updated_at
            FROM training_sessions
            WHERE status = $1
              AND scheduled_at < $2
              AND ($3::timestamptz IS NULL OR (scheduled_at, id) > ($3, $4::uuid))
            ORDER BY scheduled_at ASC, id ASC
            LIMIT $5
            "#,
        )
        .bind(SessionStatus::Scheduled.as_str())
        .bind(cutoff.as_datetime())
        .bind(after.map(|c| *c.scheduled_at.as_datetime()))
        .bind(after.map(|c| *c.session_id.as_uuid()))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("select expirable sessions", e))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn compare_and_set_status(
        &self,
        id: &TrainingSessionId,
        expected: SessionStatus,
        target: SessionStatus,
        at: Timestamp,
    ) -> Result<bool, DomainError> {
        if !expected.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot move session from {} to {}", expected, target),
            )
            .with_detail("session_id", id.to_string()));
        }

        let result = sqlx::query(
            r#"
            UPDATE training_sessions
            SET status = $3, updated_at = $4
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .bind(target.as_str())
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update session status", e))?;

        Ok(result.rows_affected() == 1)
    }
}
