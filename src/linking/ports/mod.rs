//! Port contracts for pull-request-to-task linking.
//!
//! Ports define infrastructure-agnostic interfaces used by linking services.

pub mod tracker;

#[cfg(test)]
pub use tracker::MockTaskTracker;
pub use tracker::{TaskTracker, TrackerError, TrackerResult};
