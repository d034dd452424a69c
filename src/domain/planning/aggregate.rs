//! Planning aggregate.
//!
//! A planning is a client's named collection of training sessions over a
//! date range. Plannings are created by the onboarding/coaching workflow;
//! this service only reads them and moves their sessions through the
//! lifecycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ClientId, DomainError, PlanningId, SessionStatus, Timestamp, TrainingSessionId,
};

use super::TrainingSession;

/// Maximum length for a planning name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Planning aggregate - ordered training sessions for one client.
///
/// # Invariants
///
/// - `starts_on <= ends_on`
/// - `name` is non-empty and at most 200 characters
/// - every session's `planning_id` equals `id`
/// - `sessions` are ordered by scheduled start ascending, then by ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planning {
    id: PlanningId,
    client_id: ClientId,
    name: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    created_at: Timestamp,
    sessions: Vec<TrainingSession>,
}

impl Planning {
    /// Create an empty planning.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name is blank or too long, or the date
    ///   range is inverted
    pub fn new(
        id: PlanningId,
        client_id: ClientId,
        name: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        created_at: Timestamp,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;
        if ends_on < starts_on {
            return Err(DomainError::validation(
                "ends_on",
                format!("Planning ends on {} before it starts on {}", ends_on, starts_on),
            ));
        }

        Ok(Self {
            id,
            client_id,
            name,
            starts_on,
            ends_on,
            created_at,
            sessions: Vec::new(),
        })
    }

    /// Reconstitute a planning from persistence (no validation).
    ///
    /// Sessions are put back into scheduled order whatever order the
    /// store returned them in.
    pub fn reconstitute(
        id: PlanningId,
        client_id: ClientId,
        name: String,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        created_at: Timestamp,
        mut sessions: Vec<TrainingSession>,
    ) -> Self {
        sessions.sort_by(|a, b| session_order(a).cmp(&session_order(b)));
        Self {
            id,
            client_id,
            name,
            starts_on,
            ends_on,
            created_at,
            sessions,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PlanningId {
        &self.id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    pub fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Sessions in scheduled order.
    pub fn sessions(&self) -> &[TrainingSession] {
        &self.sessions
    }

    pub fn session(&self, id: &TrainingSessionId) -> Option<&TrainingSession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// Mutable access for store adapters applying a committed transition.
    pub(crate) fn session_mut(&mut self, id: &TrainingSessionId) -> Option<&mut TrainingSession> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    /// Number of sessions currently in `status`.
    pub fn count_with_status(&self, status: SessionStatus) -> usize {
        self.sessions.iter().filter(|s| s.status() == status).count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a session, keeping scheduled order.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the session belongs to another planning or
    ///   its ID is already present
    pub fn add_session(&mut self, session: TrainingSession) -> Result<(), DomainError> {
        if session.planning_id() != &self.id {
            return Err(DomainError::validation(
                "planning_id",
                format!(
                    "Session {} belongs to planning {}, not {}",
                    session.id(),
                    session.planning_id(),
                    self.id
                ),
            ));
        }
        if self.session(session.id()).is_some() {
            return Err(DomainError::validation(
                "session_id",
                format!("Session {} is already part of planning {}", session.id(), self.id),
            ));
        }

        let key = session_order(&session);
        let pos = self.sessions.partition_point(|s| session_order(s) < key);
        self.sessions.insert(pos, session);
        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Name must be {} characters or less", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}

fn session_order(session: &TrainingSession) -> (Timestamp, TrainingSessionId) {
    (*session.scheduled_at(), *session.id())
}
