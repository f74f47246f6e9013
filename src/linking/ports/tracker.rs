//! Task tracker port covering the remote calls made while linking.

use crate::linking::domain::{ProjectGid, SectionGid, SectionRef, TaskComment, TaskGid, TrackedTask};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Remote task tracker contract.
///
/// Every method is a suspension point; implementations must not block the
/// executor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskTracker: Send + Sync {
    /// Reads a task's project memberships, with sections where available.
    async fn get_task(&self, task: &TaskGid) -> TrackerResult<TrackedTask>;

    /// Lists the sections of a project.
    async fn list_sections(&self, project: &ProjectGid) -> TrackerResult<Vec<SectionRef>>;

    /// Adds a task to a section, moving it within the section's project.
    async fn add_task_to_section(&self, section: &SectionGid, task: &TaskGid)
    -> TrackerResult<()>;

    /// Lists the comments already posted on a task.
    async fn list_comments(&self, task: &TaskGid) -> TrackerResult<Vec<TaskComment>>;

    /// Posts a comment on a task.
    async fn add_comment(&self, task: &TaskGid, text: &str) -> TrackerResult<()>;
}

/// Errors returned by task tracker adapters.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The tracker does not know the addressed resource.
    #[error("{kind} {gid} not found")]
    NotFound {
        /// Resource kind (`task`, `project`, `section`).
        kind: &'static str,
        /// Resource gid.
        gid: String,
    },

    /// The tracker answered with a non-success status.
    #[error("{operation} failed with status {status}: {body}")]
    Status {
        /// Operation label.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The request did not complete (connect failure, timeout, reset).
    #[error("{operation} request failed: {cause}")]
    Transport {
        /// Operation label.
        operation: String,
        /// Underlying transport error.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The response body could not be decoded.
    #[error("failed to decode {operation} response: {reason}")]
    Decode {
        /// Operation label.
        operation: String,
        /// Decoder message.
        reason: String,
    },

    /// Adapter-internal failure.
    #[error("tracker runtime error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerError {
    /// Wraps a runtime error from an adapter.
    #[must_use]
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }

    /// Wraps a transport error for an operation.
    #[must_use]
    pub fn transport(
        operation: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            operation: operation.into(),
            cause: Arc::new(err),
        }
    }
}
