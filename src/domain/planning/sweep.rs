//! Value types describing an expiration sweep pass.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, TrainingSessionId};

use super::TrainingSession;

/// Keyset position inside the `(scheduled_at, id)` ordering of
/// expirable sessions. A page query returns rows strictly after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SweepCursor {
    pub scheduled_at: Timestamp,
    pub session_id: TrainingSessionId,
}

impl SweepCursor {
    /// Cursor pointing at `session`, so the next page starts after it.
    pub fn after(session: &TrainingSession) -> Self {
        Self {
            scheduled_at: *session.scheduled_at(),
            session_id: *session.id(),
        }
    }

    /// True if `session` sorts strictly after this cursor.
    pub fn precedes(&self, session: &TrainingSession) -> bool {
        *self < Self::after(session)
    }
}

/// Outcome of one sweep pass.
///
/// Contended rows are counted but never identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// The "now" snapshot every eligibility check used.
    pub cutoff: Timestamp,
    /// Sessions this pass moved to `EXPIRED`.
    pub expired: u64,
    /// Selected sessions whose conditional update missed.
    pub skipped: u64,
    /// Store pages read.
    pub pages: u32,
}

impl SweepReport {
    pub fn new(cutoff: Timestamp) -> Self {
        Self {
            cutoff,
            expired: 0,
            skipped: 0,
            pages: 0,
        }
    }

    /// True when the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.expired == 0
    }
}
