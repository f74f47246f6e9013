//! In-memory adapters for deterministic tests.

mod tracker;

pub use tracker::{InMemoryTaskTracker, TrackerCall};
