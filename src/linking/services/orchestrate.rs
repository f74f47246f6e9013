//! Fan-out of reconciliation and commenting across referenced tasks.

use super::comment::{CommentAppender, CommentPolicy};
use super::reconcile::TaskReconciler;
use super::report::{RunReport, TargetOutcome, TaskReport};
use super::section_cache::SectionCache;
use crate::linking::{
    domain::{CommentTemplate, LinkingDomainError, PullRequest, TaskGid, Target},
    extract::TaskLinkExtractor,
    ports::TaskTracker,
};
use futures::future::join_all;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// What every linked task should receive.
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Desired placements, applied to every task.
    pub targets: Vec<Target>,
    /// Comment posted on every task; empty disables commenting.
    pub comment_template: CommentTemplate,
    /// Duplicate-detection policy for the comment.
    pub comment_policy: CommentPolicy,
    /// Fail the run after completion when any task hit a remote error.
    pub propagate_failures: bool,
}

/// Service-level errors for a linking run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The comment template could not be rendered; no remote call was made.
    #[error(transparent)]
    Template(#[from] LinkingDomainError),

    /// Every task was attempted, but some hit remote errors.
    #[error("{failed_tasks} of {total_tasks} Asana task(s) hit remote errors")]
    RemoteFailures {
        /// Tasks with at least one failed remote call.
        failed_tasks: usize,
        /// Tasks attempted.
        total_tasks: usize,
        /// Full run report.
        report: Box<RunReport>,
    },
}

/// Links one pull request to every Asana task its description references.
pub struct LinkOrchestrator<T, C>
where
    T: TaskTracker + ?Sized,
    C: Clock + Send + Sync,
{
    extractor: TaskLinkExtractor,
    reconciler: TaskReconciler<T>,
    appender: CommentAppender<T>,
    config: OrchestratorConfig,
    clock: Arc<C>,
}

impl<T, C> LinkOrchestrator<T, C>
where
    T: TaskTracker + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates an orchestrator. All tasks of a run share one section cache.
    #[must_use]
    pub fn new(
        tracker: Arc<T>,
        extractor: TaskLinkExtractor,
        config: OrchestratorConfig,
        clock: Arc<C>,
    ) -> Self {
        let reconciler =
            TaskReconciler::with_section_cache(Arc::clone(&tracker), Arc::new(SectionCache::new()));
        let appender = CommentAppender::new(tracker, config.comment_policy);
        Self {
            extractor,
            reconciler,
            appender,
            config,
            clock,
        }
    }

    /// Processes every task referenced by the pull request description.
    ///
    /// Distinct tasks run concurrently. Repeated references to one task run
    /// one after another. Within a task, targets are reconciled before the
    /// comment is appended. The call returns once every task finished.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Template`] before any remote call when the
    /// description links at least one task and the comment template cannot
    /// be rendered, and [`RunError::RemoteFailures`] after all tasks completed
    /// when failure propagation is enabled and any task hit a remote error.
    pub async fn run(&self, pull_request: &PullRequest) -> Result<RunReport, RunError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("link_run", %run_id, pull_request = pull_request.url());
        self.run_inner(run_id, pull_request).instrument(span).await
    }

    async fn run_inner(
        &self,
        run_id: Uuid,
        pull_request: &PullRequest,
    ) -> Result<RunReport, RunError> {
        let started_at = self.clock.utc();
        let tasks: Vec<TaskGid> = self.extractor.extract(pull_request.body()).collect();
        let comment = if tasks.is_empty() {
            info!(
                trigger_phrase = self.extractor.trigger_phrase(),
                "no Asana task links found in the pull request description"
            );
            None
        } else {
            self.config.comment_template.render(pull_request)?
        };

        let mut indexed: Vec<(usize, TaskReport)> = join_all(
            group_occurrences(tasks)
                .into_iter()
                .map(|(task, occurrences)| {
                    self.process_occurrences(task, occurrences, comment.as_deref())
                }),
        )
        .await
        .into_iter()
        .flatten()
        .collect();
        indexed.sort_by_key(|(index, _)| *index);
        let reports = indexed.into_iter().map(|(_, report)| report).collect();

        let report = RunReport {
            run_id,
            started_at,
            finished_at: self.clock.utc(),
            tasks: reports,
        };
        let failed_tasks = report.failed_task_count();
        info!(
            tasks = report.tasks.len(),
            moved = report.count_targets(|outcome| matches!(outcome, TargetOutcome::Moved { .. })),
            already_in_place =
                report.count_targets(|outcome| matches!(outcome, TargetOutcome::AlreadyInPlace)),
            failed_tasks,
            "finished linking pull request"
        );

        if self.config.propagate_failures && failed_tasks > 0 {
            warn!(failed_tasks, "propagating remote failures");
            return Err(RunError::RemoteFailures {
                failed_tasks,
                total_tasks: report.tasks.len(),
                report: Box::new(report),
            });
        }
        Ok(report)
    }

    /// Runs every occurrence of one task in extraction order.
    ///
    /// Occurrences of the same task never overlap, so the duplicate check of
    /// a later occurrence sees the comment posted by an earlier one.
    async fn process_occurrences(
        &self,
        task: TaskGid,
        occurrences: Vec<usize>,
        comment: Option<&str>,
    ) -> Vec<(usize, TaskReport)> {
        let mut reports = Vec::with_capacity(occurrences.len());
        for index in occurrences {
            reports.push((index, self.process_task(task.clone(), comment).await));
        }
        reports
    }

    async fn process_task(&self, task: TaskGid, comment: Option<&str>) -> TaskReport {
        let span = info_span!("task", task_gid = %task);
        async {
            let targets = self.reconciler.reconcile(&task, &self.config.targets).await;
            let comment_outcome = self.appender.append(&task, comment).await;
            TaskReport {
                task,
                targets,
                comment: comment_outcome,
            }
        }
        .instrument(span)
        .await
    }
}

/// Groups occurrence indices by task, keeping first-seen task order.
fn group_occurrences(tasks: Vec<TaskGid>) -> Vec<(TaskGid, Vec<usize>)> {
    let mut positions: HashMap<TaskGid, usize> = HashMap::new();
    let mut groups: Vec<(TaskGid, Vec<usize>)> = Vec::new();
    for (index, task) in tasks.into_iter().enumerate() {
        if let Some(group) = positions
            .get(&task)
            .and_then(|position| groups.get_mut(*position))
        {
            group.1.push(index);
            continue;
        }
        positions.insert(task.clone(), groups.len());
        groups.push((task, vec![index]));
    }
    groups
}
