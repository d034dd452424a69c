//! Session store port (write side).
//!
//! The two capabilities the expiration sweeper needs from persistence:
//! a paged filter on status and start time, and a per-row
//! compare-status-then-set write.
//!
//! # Design
//!
//! - **Conditional writes only**: no blanket "expire everything before X"
//!   update, so a completion landing between select and write is never
//!   overwritten
//! - **Per-row atomicity**: each conditional write commits on its own; a
//!   failed pass leaves earlier rows committed
//! - **Keyset paging**: pages are ordered by `(scheduled_at, id)`

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionStatus, Timestamp, TrainingSessionId};
use crate::domain::planning::{SweepCursor, TrainingSession};

/// Store port for session lifecycle writes.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Select up to `limit` sessions with status `SCHEDULED` whose scheduled
    /// start is strictly before `cutoff`.
    ///
    /// Results are ordered by `(scheduled_at, id)` ascending and start
    /// strictly after `after` when a cursor is given.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn find_expirable(
        &self,
        cutoff: Timestamp,
        after: Option<SweepCursor>,
        limit: u32,
    ) -> Result<Vec<TrainingSession>, DomainError>;

    /// Atomically set the status of `id` to `target` (stamping `at` as the
    /// modification time) only if its stored status is still `expected`.
    ///
    /// Returns `false` when the precondition no longer holds or the row is
    /// gone; that outcome is not an error.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if `expected -> target` is not a legal move
    /// - `DatabaseError` on persistence failure
    async fn compare_and_set_status(
        &self,
        id: &TrainingSessionId,
        expected: SessionStatus,
        target: SessionStatus,
        at: Timestamp,
    ) -> Result<bool, DomainError>;
}
