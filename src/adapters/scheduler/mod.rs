//! Background schedulers.

mod expiration_scheduler;

pub use expiration_scheduler::{ExpirationScheduler, ExpirationSchedulerConfig};
