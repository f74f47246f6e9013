//! Application services for pull-request-to-task linking.

mod comment;
mod orchestrate;
mod reconcile;
mod report;
mod section_cache;

pub use comment::{CommentAppender, CommentPolicy};
pub use orchestrate::{LinkOrchestrator, OrchestratorConfig, RunError};
pub use reconcile::TaskReconciler;
pub use report::{CommentOutcome, RunReport, TargetOutcome, TargetReport, TaskReport};
pub use section_cache::SectionCache;
