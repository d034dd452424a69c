//! Planning reader port (read side).
//!
//! Defines the contract for retrieving a client's plannings together with
//! their sessions.
//!
//! # Design
//!
//! - **Pure read**: never changes session status, never derives an
//!   "effectively expired" status at read time
//! - **Client-scoped**: the only query is by owning client
//! - **Existence-agnostic**: an unknown client simply owns nothing

use async_trait::async_trait;

use crate::domain::foundation::{ClientId, DomainError};
use crate::domain::planning::Planning;

/// Reader port for planning queries.
#[async_trait]
pub trait PlanningReader: Send + Sync {
    /// List every planning owned by `client_id`, sessions included.
    ///
    /// Plannings are ordered by creation time ascending; sessions inside a
    /// planning by scheduled start ascending. Returns an empty vector for a
    /// client without plannings.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Planning>, DomainError>;
}
