//! PostgreSQL implementation of PlanningReader.
//!
//! Two round-trips per call: the client's plannings, then every session
//! belonging to them.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ClientId, DomainError, PlanningId, Timestamp, TrainingSessionId,
};
use crate::domain::planning::{Planning, TrainingSession};
use crate::ports::PlanningReader;

use super::{column, str_to_session_status};

/// PostgreSQL implementation of PlanningReader.
#[derive(Clone)]
pub struct PostgresPlanningReader {
    pool: PgPool,
}

impl PostgresPlanningReader {
    /// Creates a new PostgresPlanningReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn sessions_for(
        &self,
        planning_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<TrainingSession>>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, planning_id, scheduled_at, status, updated_at
            FROM training_sessions
            WHERE planning_id = ANY($1)
            ORDER BY scheduled_at ASC, id ASC
            "#,
        )
        .bind(planning_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch training sessions", e))?;

        let mut grouped: HashMap<Uuid, Vec<TrainingSession>> = HashMap::new();
        for row in rows {
            let session = row_to_session(&row)?;
            grouped
                .entry(*session.planning_id().as_uuid())
                .or_default()
                .push(session);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl PlanningReader for PostgresPlanningReader {
    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Planning>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, client_id, name, starts_on, ends_on, created_at
            FROM plannings
            WHERE client_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(client_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("list plannings by client", e))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids = rows
            .iter()
            .map(|row| column::<Uuid>(row, "id"))
            .collect::<Result<Vec<_>, _>>()?;
        let mut sessions = self.sessions_for(&ids).await?;

        rows.iter()
            .map(|row| {
                let id: Uuid = column(row, "id")?;
                let owner: String = column(row, "client_id")?;
                let name: String = column(row, "name")?;
                let starts_on: NaiveDate = column(row, "starts_on")?;
                let ends_on: NaiveDate = column(row, "ends_on")?;
                let created_at: DateTime<Utc> = column(row, "created_at")?;

                Ok(Planning::reconstitute(
                    PlanningId::from_uuid(id),
                    ClientId::new(owner)?,
                    name,
                    starts_on,
                    ends_on,
                    Timestamp::from_datetime(created_at),
                    sessions.remove(&id).unwrap_or_default(),
                ))
            })
            .collect()
    }
}

pub(super) fn row_to_session(row: &sqlx::postgres::PgRow) -> Result<TrainingSession, DomainError> {
    let id: Uuid = column(row, "id")?;
    let planning_id: Uuid = column(row, "planning_id")?;
    let scheduled_at: DateTime<Utc> = column(row, "scheduled_at")?;
    let status: String = column(row, "status")?;
    let updated_at: DateTime<Utc> = column(row, "updated_at")?;

    Ok(TrainingSession::reconstitute(
        TrainingSessionId::from_uuid(id),
        PlanningId::from_uuid(planning_id),
        Timestamp::from_datetime(scheduled_at),
        str_to_session_status(&status)?,
        Timestamp::from_datetime(updated_at),
    ))
}
