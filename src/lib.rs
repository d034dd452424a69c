//! Coach Planning - training-session planning lifecycle service
//!
//! Serves a client's plannings with their sessions and expires scheduled
//! sessions whose start time has passed, using per-row conditional updates
//! so a concurrent completion is never overwritten.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
