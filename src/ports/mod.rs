//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PlanningReader` - list-by-client reads of plannings and sessions
//! - `SessionStore` - paged expirable-session selection and conditional writes
//! - `Clock` - the time source read at the boundary

mod clock;
mod planning_reader;
mod session_store;

pub use clock::Clock;
pub use planning_reader::PlanningReader;
pub use session_store::SessionStore;
