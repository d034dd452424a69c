//! Clock port.
//!
//! The boundary layer reads the time once and hands it to the core, so the
//! sweep never consults an ambient clock.

use crate::domain::foundation::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
