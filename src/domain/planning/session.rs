//! Training session entity.
//!
//! A session is one scheduled training occurrence inside a planning. It
//! points back at its planning by ID; the planning aggregate holds the
//! ordered collection.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, PlanningId, SessionStatus, StateMachine, Timestamp, TrainingSessionId,
};

/// A single scheduled training occurrence.
///
/// # Invariants
///
/// - `status` only moves forward (see [`SessionStatus`])
/// - `updated_at` is the time of the last status change, or creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    id: TrainingSessionId,
    planning_id: PlanningId,
    scheduled_at: Timestamp,
    status: SessionStatus,
    updated_at: Timestamp,
}

impl TrainingSession {
    /// Create a freshly scheduled session.
    pub fn schedule(
        id: TrainingSessionId,
        planning_id: PlanningId,
        scheduled_at: Timestamp,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            planning_id,
            scheduled_at,
            status: SessionStatus::Scheduled,
            updated_at: created_at,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: TrainingSessionId,
        planning_id: PlanningId,
        scheduled_at: Timestamp,
        status: SessionStatus,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            planning_id,
            scheduled_at,
            status,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TrainingSessionId {
        &self.id
    }

    pub fn planning_id(&self) -> &PlanningId {
        &self.planning_id
    }

    pub fn scheduled_at(&self) -> &Timestamp {
        &self.scheduled_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle rules
    // ─────────────────────────────────────────────────────────────────────────

    /// True iff the session is still scheduled and its start lies strictly
    /// before `now`.
    pub fn is_expirable_at(&self, now: &Timestamp) -> bool {
        self.status == SessionStatus::Scheduled && self.scheduled_at.is_before(now)
    }

    /// Mark the session completed.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is scheduled
    pub fn complete(&mut self, at: Timestamp) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Completed, at)
    }

    /// Move to `target`, stamping `at` as the modification time.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the state machine forbids the move
    pub fn transition_to(&mut self, target: SessionStatus, at: Timestamp) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("session_id", self.id.to_string())
        })?;
        self.updated_at = at;
        Ok(())
    }
}
