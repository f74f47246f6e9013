//! Domain model for pull-request-to-task linking.
//!
//! The domain holds identifiers, desired placements, pull request values and
//! read-only snapshots of tracker state. It performs no I/O.

mod comment;
mod error;
mod ids;
mod pull_request;
mod target;
mod tracked;

pub use comment::CommentTemplate;
pub use error::LinkingDomainError;
pub use ids::{ProjectGid, SectionGid, TaskGid};
pub use pull_request::PullRequest;
pub use target::Target;
pub use tracked::{ProjectMembership, ProjectRef, SectionRef, TaskComment, TrackedTask};
