//! Outcome records produced by the linking services.

use crate::linking::{
    domain::{SectionGid, TaskGid, Target},
    ports::TrackerError,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Result of reconciling one task against one target.
#[derive(Debug, Clone)]
pub enum TargetOutcome {
    /// The task was added to the target section.
    Moved {
        /// Section the task now belongs to.
        section: SectionGid,
    },
    /// The task already sat in the target section; nothing was changed.
    AlreadyInPlace,
    /// The task is not a member of the target project.
    ProjectNotFound,
    /// The target project has no section with the target name.
    SectionNotFound,
    /// A remote call failed while processing this target.
    Error(TrackerError),
}

impl TargetOutcome {
    /// Returns a short stable label for logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::AlreadyInPlace => "already_in_place",
            Self::ProjectNotFound => "project_not_found",
            Self::SectionNotFound => "section_not_found",
            Self::Error(_) => "error",
        }
    }

    /// Returns `true` when a remote call failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Outcome for one target, paired with the target itself.
#[derive(Debug, Clone)]
pub struct TargetReport {
    /// The desired placement.
    pub target: Target,
    /// What reconciliation did about it.
    pub outcome: TargetOutcome,
}

/// Result of the comment step for one task.
#[derive(Debug, Clone)]
pub enum CommentOutcome {
    /// No comment text was configured; no remote call was made.
    NoOp,
    /// The comment was posted.
    Posted,
    /// An identical comment already existed, so none was posted.
    SkippedDuplicate,
    /// Listing or posting comments failed.
    Error(TrackerError),
}

impl CommentOutcome {
    /// Returns a short stable label for logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoOp => "no_op",
            Self::Posted => "posted",
            Self::SkippedDuplicate => "skipped_duplicate",
            Self::Error(_) => "error",
        }
    }

    /// Returns `true` when a remote call failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Everything done for one task reference.
#[derive(Debug, Clone)]
pub struct TaskReport {
    /// The referenced task.
    pub task: TaskGid,
    /// One entry per target, in target input order.
    pub targets: Vec<TargetReport>,
    /// Comment step result.
    pub comment: CommentOutcome,
}

impl TaskReport {
    /// Returns `true` when any target or the comment step hit a remote error.
    #[must_use]
    pub fn has_remote_error(&self) -> bool {
        self.comment.is_error() || self.targets.iter().any(|report| report.outcome.is_error())
    }
}

/// Result of one orchestrator run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Correlation id recorded on the run's tracing span.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When every task had completed.
    pub finished_at: DateTime<Utc>,
    /// One entry per task reference, in extraction order.
    pub tasks: Vec<TaskReport>,
}

impl RunReport {
    /// Returns `true` when no task reference was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Counts tasks that recorded at least one remote error.
    #[must_use]
    pub fn failed_task_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| task.has_remote_error())
            .count()
    }

    /// Counts target outcomes matching `predicate` across all tasks.
    #[must_use]
    pub fn count_targets(&self, predicate: impl Fn(&TargetOutcome) -> bool) -> usize {
        self.tasks
            .iter()
            .flat_map(|task| task.targets.iter())
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}
