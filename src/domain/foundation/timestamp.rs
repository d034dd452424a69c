//! UTC instants used for scheduling and audit columns.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A point in time in UTC. Serializes as an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Reads the system clock. Core code receives "now" as an argument
    /// instead; this is for the clock adapter and for tests.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Strict ordering: an instant is never before itself.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self < other
    }

    pub fn is_after(&self, other: &Timestamp) -> bool {
        self > other
    }

    pub fn plus_minutes(&self, minutes: i64) -> Self {
        self.shifted(Duration::minutes(minutes))
    }

    pub fn plus_hours(&self, hours: i64) -> Self {
        self.shifted(Duration::hours(hours))
    }

    pub fn plus_days(&self, days: i64) -> Self {
        self.shifted(Duration::days(days))
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    fn shifted(&self, by: Duration) -> Self {
        Self(self.0 + by)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
