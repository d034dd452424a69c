//! In-Memory Planning Store Adapter
//!
//! Holds plannings with their sessions in memory and implements both the
//! read port and the session store port. Conditional writes take the write
//! lock, so compare and set are atomic per call.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, PlanningId, SessionStatus, StateMachine, Timestamp,
    TrainingSessionId,
};
use crate::domain::planning::{Planning, SweepCursor, TrainingSession};
use crate::ports::{PlanningReader, SessionStore};

/// In-memory storage for plannings
#[derive(Debug, Clone)]
pub struct InMemoryPlanningStore {
    plannings: Arc<RwLock<Vec<Planning>>>,
}

impl InMemoryPlanningStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            plannings: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Insert or replace a planning
    pub async fn insert(&self, planning: Planning) {
        let mut plannings = self.plannings.write().await;
        match plannings.iter_mut().find(|p| p.id() == planning.id()) {
            Some(existing) => *existing = planning,
            None => plannings.push(planning),
        }
    }

    pub async fn planning(&self, id: &PlanningId) -> Option<Planning> {
        self.plannings
            .read()
            .await
            .iter()
            .find(|p| p.id() == id)
            .cloned()
    }

    /// Current copy of one session, wherever it lives
    pub async fn session(&self, id: &TrainingSessionId) -> Option<TrainingSession> {
        self.plannings
            .read()
            .await
            .iter()
            .find_map(|p| p.session(id))
            .cloned()
    }

    /// Number of sessions currently in `status`
    pub async fn count_with_status(&self, status: SessionStatus) -> usize {
        self.plannings
            .read()
            .await
            .iter()
            .map(|p| p.count_with_status(status))
            .sum()
    }
}

impl Default for InMemoryPlanningStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanningReader for InMemoryPlanningStore {
    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Planning>, DomainError> {
        let mut found: Vec<Planning> = self
            .plannings
            .read()
            .await
            .iter()
            .filter(|p| p.client_id() == client_id)
            .cloned()
            .collect();
        // Stable sort: equal creation times keep insertion order.
        found.sort_by_key(|p| *p.created_at());
        Ok(found)
    }
}

#[async_trait]
impl SessionStore for InMemoryPlanningStore {
    async fn find_expirable(
        &self,
        cutoff: Timestamp,
        after: Option<SweepCursor>,
        limit: u32,
    ) -> Result<Vec<TrainingSession>, DomainError> {
        let plannings = self.plannings.read().await;
        let mut page: Vec<TrainingSession> = plannings
            .iter()
            .flat_map(|p| p.sessions())
            .filter(|s| s.is_expirable_at(&cutoff))
            .filter(|s| after.map_or(true, |cursor| cursor.precedes(s)))
            .cloned()
            .collect();
        page.sort_by_key(SweepCursor::after);
        page.truncate(limit as usize);
        Ok(page)
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

        let mut plannings = self.plannings.write().await;
        let Some(session) = plannings.iter_mut().find_map(|p| p.session_mut(id)) else {
            return Ok(false);
        };
        if session.status() != expected {
            return Ok(false);
        }
        session.transition_to(target, at)?;
        Ok(true)
    }
}
