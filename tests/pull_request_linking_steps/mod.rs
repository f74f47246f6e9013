//! Step definitions for pull request linking scenarios.

pub mod world;

mod given;
mod then;
mod when;
