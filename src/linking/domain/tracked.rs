//! Snapshots of remote tracker state read during reconciliation.

use super::{ProjectGid, SectionGid, TaskGid};
use serde::{Deserialize, Serialize};

/// A project reference with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Project gid.
    pub gid: ProjectGid,
    /// Project display name.
    pub name: String,
}

impl ProjectRef {
    /// Creates a project reference.
    #[must_use]
    pub fn new(gid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            gid: ProjectGid::new(gid),
            name: name.into(),
        }
    }
}

/// A section reference with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    /// Section gid.
    pub gid: SectionGid,
    /// Section display name.
    pub name: String,
}

impl SectionRef {
    /// Creates a section reference.
    #[must_use]
    pub fn new(gid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            gid: SectionGid::new(gid),
            name: name.into(),
        }
    }
}

/// A task's membership in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembership {
    /// The project the task belongs to.
    pub project: ProjectRef,
    /// The task's current section in that project, when the tracker reports one.
    pub section: Option<SectionRef>,
}

/// Project memberships of a task as read from the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTask {
    gid: TaskGid,
    memberships: Vec<ProjectMembership>,
}

impl TrackedTask {
    /// Creates a task snapshot.
    #[must_use]
    pub const fn new(gid: TaskGid, memberships: Vec<ProjectMembership>) -> Self {
        Self { gid, memberships }
    }

    /// Returns the task gid.
    #[must_use]
    pub const fn gid(&self) -> &TaskGid {
        &self.gid
    }

    /// Returns every project membership.
    #[must_use]
    pub fn memberships(&self) -> &[ProjectMembership] {
        &self.memberships
    }

    /// Finds the membership for a project by display name.
    #[must_use]
    pub fn membership_in(&self, project_name: &str) -> Option<&ProjectMembership> {
        self.memberships
            .iter()
            .find(|membership| membership.project.name == project_name)
    }
}

/// A comment previously posted on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    /// Comment text.
    pub text: String,
}

impl TaskComment {
    /// Creates a comment value.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
