//! Expiration sweeper configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::SweepSettings;

const MAX_PAGE_SIZE: u32 = 10_000;

/// Expiration sweeper configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SweeperConfig {
    /// Seconds between background passes; 0 disables the scheduler
    #[serde(default)]
    pub interval_secs: u64,

    /// Sessions selected per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Bound on each store call, in seconds
    #[serde(default = "default_store_timeout")]
    pub store_timeout_secs: u64,

    /// Bound on a whole pass, in seconds
    #[serde(default = "default_pass_timeout")]
    pub pass_timeout_secs: u64,
}

impl SweeperConfig {
    /// Interval for the background scheduler, if enabled.
    pub fn interval(&self) -> Option<Duration> {
        (self.interval_secs > 0).then(|| Duration::from_secs(self.interval_secs))
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    pub fn pass_timeout(&self) -> Duration {
        Duration::from_secs(self.pass_timeout_secs)
    }

    pub fn to_settings(&self) -> SweepSettings {
        SweepSettings::default()
            .with_page_size(self.page_size)
            .with_store_timeout(self.store_timeout())
            .with_pass_timeout(self.pass_timeout())
    }

    /// Validate sweeper configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ValidationError::InvalidPageSize);
        }
        if self.store_timeout_secs == 0 {
            return Err(ValidationError::InvalidStoreTimeout);
        }
        if self.pass_timeout_secs == 0 {
            return Err(ValidationError::InvalidPassTimeout);
        }
        Ok(())
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: 0,
            page_size: default_page_size(),
            store_timeout_secs: default_store_timeout(),
            pass_timeout_secs: default_pass_timeout(),
        }
    }
}

fn default_page_size() -> u32 {
    500
}

fn default_store_timeout() -> u64 {
    10
}

fn default_pass_timeout() -> u64 {
    300
}
