//! Unit tests for the linking module.
//!
//! Service tests run against [`InMemoryTaskTracker`] for stateful scenarios
//! and against the generated `MockTaskTracker` where exact call counts
//! matter.
//!
//! [`InMemoryTaskTracker`]: crate::linking::adapters::memory::InMemoryTaskTracker

mod comment_tests;
mod domain_tests;
