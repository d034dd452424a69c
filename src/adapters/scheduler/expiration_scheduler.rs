//! ExpirationScheduler - Background service running periodic sweep passes.
//!
//! Each tick reads the clock once and runs one pass of
//! [`ExpireSessionsHandler`] with that snapshot. A failed pass is logged and
//! the next tick tries again; passes are idempotent, so nothing is lost.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `interval` | 300s | Time between pass starts |
//!
//! ## Graceful Shutdown
//!
//! A pass already in flight runs to completion; the loop exits at the next
//! select point once the shutdown signal is observed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

use crate::application::{ExpireSessionsCommand, ExpireSessionsHandler};
use crate::domain::planning::{PlanningError, SweepReport};
use crate::ports::Clock;

/// Configuration for the ExpirationScheduler service.
#[derive(Debug, Clone)]
pub struct ExpirationSchedulerConfig {
    /// Time between pass starts.
    pub interval: Duration,
}

impl Default for ExpirationSchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
        }
    }
}

impl ExpirationSchedulerConfig {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Background service that expires elapsed sessions on a timer.
pub struct ExpirationScheduler {
    handler: Arc<ExpireSessionsHandler>,
    clock: Arc<dyn Clock>,
    config: ExpirationSchedulerConfig,
}

impl ExpirationScheduler {
    pub fn new(handler: Arc<ExpireSessionsHandler>, clock: Arc<dyn Clock>) -> Self {
        Self::with_config(handler, clock, ExpirationSchedulerConfig::default())
    }

    pub fn with_config(
        handler: Arc<ExpireSessionsHandler>,
        clock: Arc<dyn Clock>,
        config: ExpirationSchedulerConfig,
    ) -> Self {
        Self {
            handler,
            clock,
            config,
        }
    }

    /// Run passes until the shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.config.interval.as_secs(),
            "Expiration scheduler started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Expiration scheduler stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.run_once().await {
                        tracing::error!(error = %e, "Scheduled expiration pass failed");
                    }
                }
            }
        }
    }

    /// Run a single pass as of the clock's current time.
    pub async fn run_once(&self) -> Result<SweepReport, PlanningError> {
        let now = self.clock.now();
        self.handler.handle(ExpireSessionsCommand { now }).await
    }
}
