//! ExpireSessionsHandler - Command handler for one expiration sweep pass.
//!
//! A pass works against a single "now" snapshot supplied by the caller:
//!
//! 1. Select `SCHEDULED` sessions starting before the snapshot, one keyset
//!    page at a time
//! 2. Conditionally move each to `EXPIRED` (only if still `SCHEDULED`)
//! 3. Count misses as contended and move on; the concurrent writer wins
//!
//! Every store call is bounded by `store_timeout` and the whole pass by
//! `pass_timeout`. A store error or either timeout aborts the pass with
//! `StoreUnavailable`; rows committed before that stay expired.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `page_size` | 500 | Sessions selected per store round-trip |
//! | `store_timeout` | 10s | Bound on each store interaction |
//! | `pass_timeout` | 300s | Bound on the pass as a whole |

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, SessionStatus, Timestamp};
use crate::domain::planning::{PlanningError, SweepCursor, SweepReport};
use crate::ports::SessionStore;

/// Tuning for a sweep pass.
#[derive(Debug, Clone)]
pub struct SweepSettings {
    /// Maximum sessions selected per page.
    pub page_size: u32,

    /// Bound on each individual store call.
    pub store_timeout: Duration,

    /// Bound on the whole pass, across all pages.
    pub pass_timeout: Duration,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            page_size: 500,
            store_timeout: Duration::from_secs(10),
            pass_timeout: Duration::from_secs(300),
        }
    }
}

impl SweepSettings {
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn with_pass_timeout(mut self, timeout: Duration) -> Self {
        self.pass_timeout = timeout;
        self
    }
}

/// Command to run one sweep pass as of `now`.
#[derive(Debug, Clone, Copy)]
pub struct ExpireSessionsCommand {
    pub now: Timestamp,
}

/// Handler for the expiration sweep.
pub struct ExpireSessionsHandler {
    store: Arc<dyn SessionStore>,
    settings: SweepSettings,
}

impl ExpireSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_settings(store, SweepSettings::default())
    }

    pub fn with_settings(store: Arc<dyn SessionStore>, settings: SweepSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &SweepSettings {
        &self.settings
    }

    pub async fn handle(&self, cmd: ExpireSessionsCommand) -> Result<SweepReport, PlanningError> {
        let mut report = SweepReport::new(cmd.now);

        let pass = tokio::time::timeout(self.settings.pass_timeout, self.sweep(&mut report));
        let outcome = match pass.await {
            Ok(result) => result,
            Err(_) => Err(DomainError::new(
                ErrorCode::StoreTimeout,
                format!("sweep pass timed out after {:?}", self.settings.pass_timeout),
            )
            .into()),
        };

        match outcome {
            Ok(()) => {
                tracing::info!(
                    cutoff = %report.cutoff.to_rfc3339(),
                    expired = report.expired,
                    skipped = report.skipped,
                    pages = report.pages,
                    "Expiration sweep completed"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(
                    cutoff = %report.cutoff.to_rfc3339(),
                    expired = report.expired,
                    error = %e,
                    "Expiration sweep aborted"
                );
                Err(e)
            }
        }
    }

    async fn sweep(&self, report: &mut SweepReport) -> Result<(), PlanningError> {
        let cutoff = report.cutoff;
        let page_size = self.settings.page_size.max(1);
        let mut cursor: Option<SweepCursor> = None;

        loop {
            let page = self
                .bounded(
                    "select expirable sessions",
                    self.store.find_expirable(cutoff, cursor, page_size),
                )
                .await?;
            report.pages += 1;

            let Some(last) = page.last() else {
                return Ok(());
            };
            cursor = Some(SweepCursor::after(last));

            for session in &page {
                if !session.is_expirable_at(&cutoff) {
                    continue;
                }

                let applied = self
                    .bounded(
                        "expire session",
                        self.store.compare_and_set_status(
                            session.id(),
                            SessionStatus::Scheduled,
                            SessionStatus::Expired,
                            cutoff,
                        ),
                    )
                    .await?;

                if applied {
                    report.expired += 1;
                } else {
                    report.skipped += 1;
                    tracing::debug!(
                        session_id = %session.id(),
                        "Session changed after selection, leaving it as is"
                    );
                }
            }

            if (page.len() as u64) < u64::from(page_size) {
                return Ok(());
            }
        }
    }

    async fn bounded<T, F>(&self, operation: &str, call: F) -> Result<T, PlanningError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        match tokio::time::timeout(self.settings.store_timeout, call).await {
            Ok(result) => result.map_err(PlanningError::from),
            Err(_) => Err(DomainError::new(
                ErrorCode::StoreTimeout,
                format!("{} timed out after {:?}", operation, self.settings.store_timeout),
            )
            .into()),
        }
    }
}
