//! Wire models for the Asana REST API.

use crate::linking::domain::{
    ProjectMembership, ProjectRef, SectionRef, TaskComment, TaskGid, TrackedTask,
};
use serde::Deserialize;

/// Story subtype Asana assigns to user comments.
const COMMENT_STORY_SUBTYPE: &str = "comment_added";

#[derive(Debug, Deserialize)]
pub(super) struct DataEnvelope<T> {
    pub(super) data: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct PageEnvelope<T> {
    pub(super) data: Vec<T>,
    #[serde(default)]
    pub(super) next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct NextPage {
    pub(super) offset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct NamedResource {
    pub(super) gid: String,
    #[serde(default)]
    pub(super) name: Option<String>,
}

impl NamedResource {
    fn into_project(self) -> ProjectRef {
        ProjectRef::new(self.gid, self.name.unwrap_or_default())
    }

    pub(super) fn into_section(self) -> SectionRef {
        SectionRef::new(self.gid, self.name.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MembershipPayload {
    #[serde(default)]
    project: Option<NamedResource>,
    #[serde(default)]
    section: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskPayload {
    #[serde(default)]
    memberships: Vec<MembershipPayload>,
    #[serde(default)]
    projects: Vec<NamedResource>,
}

impl TaskPayload {
    /// Merges `memberships` and `projects` into one membership per project.
    ///
    /// Projects listed only under `projects` carry no section.
    pub(super) fn into_tracked(self, gid: TaskGid) -> TrackedTask {
        let mut memberships: Vec<ProjectMembership> = self
            .memberships
            .into_iter()
            .filter_map(|membership| {
                Some(ProjectMembership {
                    project: membership.project?.into_project(),
                    section: membership.section.map(NamedResource::into_section),
                })
            })
            .collect();

        for project in self.projects {
            let known = memberships
                .iter()
                .any(|membership| membership.project.gid.as_str() == project.gid);
            if !known {
                memberships.push(ProjectMembership {
                    project: project.into_project(),
                    section: None,
                });
            }
        }
        TrackedTask::new(gid, memberships)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StoryPayload {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    resource_subtype: Option<String>,
}

impl StoryPayload {
    /// Returns the story as a comment when it is a user comment.
    pub(super) fn into_comment(self) -> Option<TaskComment> {
        if self.resource_subtype.as_deref() != Some(COMMENT_STORY_SUBTYPE) {
            return None;
        }
        self.text.map(TaskComment::new)
    }
}
