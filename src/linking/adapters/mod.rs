//! Adapter implementations for linking ports.
//!
//! - [`asana`]: HTTP client for the Asana REST API
//! - [`memory`]: in-memory tracker for tests and local runs

pub mod asana;
pub mod memory;
