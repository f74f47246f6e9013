//! Asana REST adapter.
//!
//! Covers the five calls the linking services need: read a task's
//! memberships, list a project's sections, move a task into a section, and
//! list or create comment stories.

mod client;
mod config;
mod models;
mod retry;

pub use client::AsanaClient;
pub use config::{AsanaClientConfig, AsanaToken, DEFAULT_API_BASE, DEFAULT_TASK_OPT_FIELDS};
