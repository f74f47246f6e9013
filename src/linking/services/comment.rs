//! Idempotent comment posting.

use super::report::CommentOutcome;
use crate::linking::{
    domain::TaskGid,
    ports::{TaskTracker, TrackerError},
};
use std::sync::Arc;
use tracing::{error, info};

/// Duplicate-detection policy for posted comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommentPolicy {
    /// Read existing comments first and skip when one has identical text.
    pub skip_duplicates: bool,
}

impl CommentPolicy {
    /// Policy that always posts.
    #[must_use]
    pub const fn always_post() -> Self {
        Self {
            skip_duplicates: false,
        }
    }

    /// Policy that skips comments whose exact text already exists.
    #[must_use]
    pub const fn skip_duplicates() -> Self {
        Self {
            skip_duplicates: true,
        }
    }
}

/// Posts the pull request comment on a task.
#[derive(Clone)]
pub struct CommentAppender<T>
where
    T: TaskTracker + ?Sized,
{
    tracker: Arc<T>,
    policy: CommentPolicy,
}

impl<T> CommentAppender<T>
where
    T: TaskTracker + ?Sized,
{
    /// Creates an appender.
    #[must_use]
    pub const fn new(tracker: Arc<T>, policy: CommentPolicy) -> Self {
        Self { tracker, policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> CommentPolicy {
        self.policy
    }

    /// Appends `text` to the task's comments.
    ///
    /// Missing or empty text is a no-op that makes no remote call. Failures
    /// are reported in the outcome, never raised.
    pub async fn append(&self, task: &TaskGid, text: Option<&str>) -> CommentOutcome {
        let Some(comment) = text.filter(|comment| !comment.trim().is_empty()) else {
            return CommentOutcome::NoOp;
        };

        let outcome = match self.post_unless_duplicate(task, comment).await {
            Ok(outcome) => outcome,
            Err(err) => CommentOutcome::Error(err),
        };
        match &outcome {
            CommentOutcome::Posted => {
                info!(task_gid = %task, "added the pull request link to the Asana task");
            }
            CommentOutcome::SkippedDuplicate => {
                info!(task_gid = %task, "identical comment already on the Asana task, skipped");
            }
            CommentOutcome::Error(err) => {
                error!(task_gid = %task, error = %err, "failed to comment on the Asana task");
            }
            CommentOutcome::NoOp => {}
        }
        outcome
    }

    async fn post_unless_duplicate(
        &self,
        task: &TaskGid,
        comment: &str,
    ) -> Result<CommentOutcome, TrackerError> {
        if self.policy.skip_duplicates {
            let existing = self.tracker.list_comments(task).await?;
            if existing.iter().any(|posted| posted.text == comment) {
                return Ok(CommentOutcome::SkippedDuplicate);
            }
        }
        self.tracker.add_comment(task, comment).await?;
        Ok(CommentOutcome::Posted)
    }
}
