//! In-memory task tracker for service and behaviour tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::linking::{
    domain::{
        ProjectGid, ProjectMembership, ProjectRef, SectionGid, SectionRef, TaskComment, TaskGid,
        TrackedTask,
    },
    ports::{TaskTracker, TrackerError, TrackerResult},
};

/// A remote call observed by [`InMemoryTaskTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    /// `get_task`
    GetTask(TaskGid),
    /// `list_sections`
    ListSections(ProjectGid),
    /// `add_task_to_section`
    AddTaskToSection(SectionGid, TaskGid),
    /// `list_comments`
    ListComments(TaskGid),
    /// `add_comment`
    AddComment(TaskGid, String),
}

impl TrackerCall {
    /// Returns `true` for calls that change tracker state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(self, Self::AddTaskToSection(..) | Self::AddComment(..))
    }

    /// Returns `true` for comment listing and posting calls.
    #[must_use]
    pub const fn is_comment_call(&self) -> bool {
        matches!(self, Self::ListComments(_) | Self::AddComment(..))
    }
}

/// Thread-safe in-memory task tracker.
///
/// Projects, sections, task memberships and comments are seeded through the
/// inherent methods. Every port call is recorded so tests can assert which
/// remote calls a service issued.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskTracker {
    state: Arc<RwLock<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    projects: HashMap<ProjectGid, SeededProject>,
    tasks: HashMap<TaskGid, Vec<SeededMembership>>,
    comments: HashMap<TaskGid, Vec<String>>,
    failing_projects: HashSet<ProjectGid>,
    failing_sections: HashSet<SectionGid>,
    failing_comment_tasks: HashSet<TaskGid>,
    calls: Vec<TrackerCall>,
}

#[derive(Debug)]
struct SeededProject {
    name: String,
    sections: Vec<SectionRef>,
}

#[derive(Debug, Clone)]
struct SeededMembership {
    project: ProjectGid,
    section: Option<SectionGid>,
}

fn lock_error(err: impl ToString) -> TrackerError {
    TrackerError::runtime(std::io::Error::other(err.to_string()))
}

fn injected_failure(operation: &str) -> TrackerError {
    TrackerError::Status {
        operation: operation.to_owned(),
        status: 500,
        body: "injected failure".to_owned(),
    }
}

impl InMemoryTaskTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a project with its ordered sections.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn add_project(
        &self,
        project: ProjectRef,
        sections: impl IntoIterator<Item = SectionRef>,
    ) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.projects.insert(
            project.gid,
            SeededProject {
                name: project.name,
                sections: sections.into_iter().collect(),
            },
        );
        Ok(())
    }

    /// Seeds a task with no project memberships.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn add_task(&self, task: TaskGid) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.tasks.entry(task).or_default();
        Ok(())
    }

    /// Adds a task to a project, optionally already placed in a section.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the task or project has not
    /// been seeded, or tracker runtime errors when lock acquisition fails.
    pub fn add_membership(
        &self,
        task: &TaskGid,
        project: &ProjectGid,
        section: Option<SectionGid>,
    ) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.projects.contains_key(project) {
            return Err(TrackerError::NotFound {
                kind: "project",
                gid: project.to_string(),
            });
        }
        let memberships = state
            .tasks
            .get_mut(task)
            .ok_or_else(|| TrackerError::NotFound {
                kind: "task",
                gid: task.to_string(),
            })?;
        memberships.push(SeededMembership {
            project: project.clone(),
            section,
        });
        Ok(())
    }

    /// Seeds an existing comment on a task.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn add_existing_comment(&self, task: &TaskGid, text: impl Into<String>) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .comments
            .entry(task.clone())
            .or_default()
            .push(text.into());
        Ok(())
    }

    /// Makes every `list_sections` call for a project fail.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn fail_sections_for(&self, project: ProjectGid) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_projects.insert(project);
        Ok(())
    }

    /// Makes every `add_task_to_section` call for a section fail.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn fail_moves_into(&self, section: SectionGid) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_sections.insert(section);
        Ok(())
    }

    /// Makes every comment call for a task fail.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn fail_comments_for(&self, task: TaskGid) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.failing_comment_tasks.insert(task);
        Ok(())
    }

    /// Returns the current section of a task within a project.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn section_of(
        &self,
        task: &TaskGid,
        project: &ProjectGid,
    ) -> TrackerResult<Option<SectionGid>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .tasks
            .get(task)
            .and_then(|memberships| memberships.iter().find(|m| &m.project == project))
            .and_then(|membership| membership.section.clone()))
    }

    /// Returns the comments currently on a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn comments_on(&self, task: &TaskGid) -> TrackerResult<Vec<String>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.comments.get(task).cloned().unwrap_or_default())
    }

    /// Returns every recorded call, oldest first.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn calls(&self) -> TrackerResult<Vec<TrackerCall>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.calls.clone())
    }

    /// Returns the recorded mutating calls, oldest first.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn mutations(&self) -> TrackerResult<Vec<TrackerCall>> {
        Ok(self
            .calls()?
            .into_iter()
            .filter(TrackerCall::is_mutation)
            .collect())
    }

    /// Forgets recorded calls while keeping seeded state.
    ///
    /// # Errors
    ///
    /// Returns tracker runtime errors when lock acquisition fails.
    pub fn clear_calls(&self) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.clear();
        Ok(())
    }
}

impl InMemoryTrackerState {
    fn project_of_section(&self, section: &SectionGid) -> Option<&ProjectGid> {
        self.projects.iter().find_map(|(gid, project)| {
            project
                .sections
                .iter()
                .any(|candidate| &candidate.gid == section)
                .then_some(gid)
        })
    }

    fn section_ref(&self, project: &ProjectGid, section: &SectionGid) -> Option<SectionRef> {
        self.projects
            .get(project)?
            .sections
            .iter()
            .find(|candidate| &candidate.gid == section)
            .cloned()
    }
}

#[async_trait]
impl TaskTracker for InMemoryTaskTracker {
    async fn get_task(&self, task: &TaskGid) -> TrackerResult<TrackedTask> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.push(TrackerCall::GetTask(task.clone()));

        let seeded = state
            .tasks
            .get(task)
            .ok_or_else(|| TrackerError::NotFound {
                kind: "task",
                gid: task.to_string(),
            })?;
        let memberships = seeded
            .iter()
            .filter_map(|membership| {
                let project = state.projects.get(&membership.project)?;
                Some(ProjectMembership {
                    project: ProjectRef {
                        gid: membership.project.clone(),
                        name: project.name.clone(),
                    },
                    section: membership
                        .section
                        .as_ref()
                        .and_then(|section| state.section_ref(&membership.project, section)),
                })
            })
            .collect();
        Ok(TrackedTask::new(task.clone(), memberships))
    }

    async fn list_sections(&self, project: &ProjectGid) -> TrackerResult<Vec<SectionRef>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.push(TrackerCall::ListSections(project.clone()));

        if state.failing_projects.contains(project) {
            return Err(injected_failure("list sections"));
        }
        state
            .projects
            .get(project)
            .map(|seeded| seeded.sections.clone())
            .ok_or_else(|| TrackerError::NotFound {
                kind: "project",
                gid: project.to_string(),
            })
    }

    async fn add_task_to_section(
        &self,
        section: &SectionGid,
        task: &TaskGid,
    ) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .calls
            .push(TrackerCall::AddTaskToSection(section.clone(), task.clone()));

        if state.failing_sections.contains(section) {
            return Err(injected_failure("add task to section"));
        }
        let project = state
            .project_of_section(section)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound {
                kind: "section",
                gid: section.to_string(),
            })?;
        let memberships = state
            .tasks
            .get_mut(task)
            .ok_or_else(|| TrackerError::NotFound {
                kind: "task",
                gid: task.to_string(),
            })?;

        if let Some(membership) = memberships.iter_mut().find(|m| m.project == project) {
            membership.section = Some(section.clone());
        } else {
            memberships.push(SeededMembership {
                project,
                section: Some(section.clone()),
            });
        }
        Ok(())
    }

    async fn list_comments(&self, task: &TaskGid) -> TrackerResult<Vec<TaskComment>> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.calls.push(TrackerCall::ListComments(task.clone()));

        if state.failing_comment_tasks.contains(task) {
            return Err(injected_failure("list comments"));
        }
        Ok(state
            .comments
            .get(task)
            .map(|texts| texts.iter().map(TaskComment::new).collect())
            .unwrap_or_default())
    }

    async fn add_comment(&self, task: &TaskGid, text: &str) -> TrackerResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .calls
            .push(TrackerCall::AddComment(task.clone(), text.to_owned()));

        if state.failing_comment_tasks.contains(task) {
            return Err(injected_failure("add comment"));
        }
        if !state.tasks.contains_key(task) {
            return Err(TrackerError::NotFound {
                kind: "task",
                gid: task.to_string(),
            });
        }
        state
            .comments
            .entry(task.clone())
            .or_default()
            .push(text.to_owned());
        Ok(())
    }
}
