//! Pull-request-to-task linking.
//!
//! Finds Asana task links in a pull request description, places each task in
//! its target sections and comments a link back to the pull request. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Link extraction in [`extract`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod extract;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
