//! Reconciliation of a task's section placement against desired targets.

use super::report::{TargetOutcome, TargetReport};
use super::section_cache::SectionCache;
use crate::linking::{
    domain::{ProjectMembership, TaskGid, Target, TrackedTask},
    ports::{TaskTracker, TrackerError},
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Moves a task into its target sections, touching only what is missing.
///
/// Every decision is derived from a membership read taken at the start of
/// the reconciliation, so re-running after a partial success only issues the
/// moves that are still outstanding.
#[derive(Clone)]
pub struct TaskReconciler<T>
where
    T: TaskTracker + ?Sized,
{
    tracker: Arc<T>,
    sections: Arc<SectionCache>,
}

impl<T> TaskReconciler<T>
where
    T: TaskTracker + ?Sized,
{
    /// Creates a reconciler with its own section cache.
    #[must_use]
    pub fn new(tracker: Arc<T>) -> Self {
        Self::with_section_cache(tracker, Arc::new(SectionCache::new()))
    }

    /// Creates a reconciler sharing an existing section cache.
    #[must_use]
    pub const fn with_section_cache(tracker: Arc<T>, sections: Arc<SectionCache>) -> Self {
        Self { tracker, sections }
    }

    /// Reconciles `task` against every target.
    ///
    /// Targets are evaluated concurrently. The returned reports follow the
    /// order of `targets`. Failures are captured per target and never abort
    /// sibling targets.
    pub async fn reconcile(&self, task: &TaskGid, targets: &[Target]) -> Vec<TargetReport> {
        if targets.is_empty() {
            return Vec::new();
        }

        let tracked = match self.tracker.get_task(task).await {
            Ok(tracked) => tracked,
            Err(err) => {
                error!(task_gid = %task, error = %err, "failed to read Asana task");
                return targets
                    .iter()
                    .map(|target| TargetReport {
                        target: target.clone(),
                        outcome: TargetOutcome::Error(err.clone()),
                    })
                    .collect();
            }
        };

        join_all(targets.iter().map(|target| async {
            let outcome = self.reconcile_target(&tracked, target).await;
            log_outcome(task, target, &outcome);
            TargetReport {
                target: target.clone(),
                outcome,
            }
        }))
        .await
    }

    async fn reconcile_target(&self, tracked: &TrackedTask, target: &Target) -> TargetOutcome {
        let Some(membership) = tracked.membership_in(target.project()) else {
            return TargetOutcome::ProjectNotFound;
        };
        match self.place(tracked.gid(), membership, target).await {
            Ok(outcome) => outcome,
            Err(err) => TargetOutcome::Error(err),
        }
    }

    async fn place(
        &self,
        task: &TaskGid,
        membership: &ProjectMembership,
        target: &Target,
    ) -> Result<TargetOutcome, TrackerError> {
        let sections = self
            .sections
            .sections(&*self.tracker, &membership.project.gid)
            .await?;
        let Some(section) = sections
            .iter()
            .find(|section| section.name == target.section())
        else {
            return Ok(TargetOutcome::SectionNotFound);
        };

        let current = membership.section.as_ref().map(|current| &current.gid);
        if current == Some(&section.gid) {
            return Ok(TargetOutcome::AlreadyInPlace);
        }

        self.tracker.add_task_to_section(&section.gid, task).await?;
        Ok(TargetOutcome::Moved {
            section: section.gid.clone(),
        })
    }
}

fn log_outcome(task: &TaskGid, target: &Target, outcome: &TargetOutcome) {
    let project = target.project();
    let section = target.section();
    match outcome {
        TargetOutcome::Moved { .. } => {
            info!(task_gid = %task, project, section, "moved task to {target}");
        }
        TargetOutcome::AlreadyInPlace => {
            info!(task_gid = %task, project, section, "task already in {target}");
        }
        TargetOutcome::ProjectNotFound => {
            warn!(task_gid = %task, project, "task does not exist in project \"{project}\"");
        }
        TargetOutcome::SectionNotFound => {
            warn!(task_gid = %task, project, section, "Asana section \"{section}\" not found");
        }
        TargetOutcome::Error(err) => {
            error!(task_gid = %task, project, section, error = %err, "failed to reconcile {target}");
        }
    }
}
