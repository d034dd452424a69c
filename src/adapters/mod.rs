//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - PostgreSQL persistence for both planning ports
//! - `memory` - In-memory store for tests and local development
//! - `clock` - System and fixed clocks
//! - `http` - Axum routes, DTOs, and error mapping
//! - `scheduler` - Periodic background expiration passes

pub mod clock;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use clock::{FixedClock, SystemClock};
pub use memory::InMemoryPlanningStore;
pub use scheduler::{ExpirationScheduler, ExpirationSchedulerConfig};
