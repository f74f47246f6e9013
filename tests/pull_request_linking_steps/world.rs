//! Shared world state for pull request linking BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use asana_pr_linker::linking::{
    adapters::memory::InMemoryTaskTracker,
    domain::{CommentTemplate, ProjectGid, PullRequest, SectionGid, TaskGid, Target},
    extract::TaskLinkExtractor,
    services::{CommentPolicy, LinkOrchestrator, OrchestratorConfig, RunError, RunReport},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Pull request URL used by every scenario.
pub const PR_URL: &str = "https://github.com/acme/web/pull/42";

/// Scenario world for pull request linking behaviour tests.
pub struct LinkWorld {
    pub tracker: Arc<InMemoryTaskTracker>,
    pub projects: HashMap<String, ProjectGid>,
    pub sections: HashMap<(String, String), SectionGid>,
    pub next_gid: u64,
    pub trigger_phrase: String,
    pub body_lines: Vec<String>,
    pub config: OrchestratorConfig,
    pub last_result: Option<Result<RunReport, RunError>>,
}

impl LinkWorld {
    /// Creates a world with an empty tracker and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: Arc::new(InMemoryTaskTracker::new()),
            projects: HashMap::new(),
            sections: HashMap::new(),
            next_gid: 1000,
            trigger_phrase: "Asana:".to_owned(),
            body_lines: Vec::new(),
            config: OrchestratorConfig::default(),
            last_result: None,
        }
    }

    /// Hands out a fresh numeric gid for seeded resources.
    pub fn allocate_gid(&mut self) -> String {
        self.next_gid += 1;
        self.next_gid.to_string()
    }

    /// Looks up a seeded project by name.
    pub fn project(&self, name: &str) -> Result<ProjectGid, eyre::Report> {
        self.projects
            .get(name)
            .cloned()
            .ok_or_else(|| eyre::eyre!("project {name} was not seeded"))
    }

    /// Looks up a seeded section by project and section name.
    pub fn section(&self, project: &str, section: &str) -> Result<SectionGid, eyre::Report> {
        self.sections
            .get(&(project.to_owned(), section.to_owned()))
            .cloned()
            .ok_or_else(|| eyre::eyre!("section {project}/{section} was not seeded"))
    }

    /// Adds a desired placement.
    pub fn add_target(&mut self, project: &str, section: &str) -> Result<(), eyre::Report> {
        self.config.targets.push(Target::new(project, section)?);
        Ok(())
    }

    /// Sets the comment template.
    pub fn set_comment(&mut self, template: &str) {
        self.config.comment_template = CommentTemplate::new(template);
    }

    /// Enables duplicate comment detection.
    pub fn skip_duplicates(&mut self) {
        self.config.comment_policy = CommentPolicy::skip_duplicates();
    }

    /// Runs one linking pass over the scenario's pull request.
    pub fn run(&mut self) -> Result<(), eyre::Report> {
        let extractor = TaskLinkExtractor::new(self.trigger_phrase.clone())?;
        let orchestrator = LinkOrchestrator::new(
            Arc::clone(&self.tracker),
            extractor,
            self.config.clone(),
            Arc::new(DefaultClock),
        );
        let pull_request = PullRequest::new(PR_URL, self.body_lines.join("\n")).with_number(42);
        self.last_result = Some(run_async(orchestrator.run(&pull_request)));
        Ok(())
    }

    /// Returns the report of the last successful run.
    pub fn last_report(&self) -> Result<&RunReport, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(report)) => Ok(report),
            Some(Err(err)) => Err(eyre::eyre!("last run failed: {err}")),
            None => Err(eyre::eyre!("the action has not run yet")),
        }
    }
}

impl Default for LinkWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LinkWorld {
    LinkWorld::default()
}

/// Parses a task gid from step text.
pub fn task_gid(raw: &str) -> Result<TaskGid, eyre::Report> {
    Ok(TaskGid::new(raw)?)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
