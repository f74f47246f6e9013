//! GitHub Action shell around the linking services.
//!
//! Validates the action inputs, reads the triggering pull request, wires the
//! Asana client into a [`LinkOrchestrator`] and runs it once.

pub mod config;
pub mod event;
pub mod telemetry;

pub use config::{ActionConfig, Cli, ConfigError};
pub use event::load_pull_request;
pub use telemetry::{TelemetryError, init_tracing};

use crate::linking::{
    adapters::asana::AsanaClient,
    extract::{ExtractorError, TaskLinkExtractor},
    ports::TrackerError,
    services::{LinkOrchestrator, RunError, RunReport},
};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;

/// Reasons an action run ends unsuccessfully.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Inputs or event payload are missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trigger phrase could not be compiled into a matcher.
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// The Asana client could not be built.
    #[error("failed to build the Asana client: {0}")]
    Client(#[source] TrackerError),

    /// The async runtime could not be started.
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The run failed or propagated remote failures.
    #[error(transparent)]
    Run(#[from] RunError),
}

/// Runs the action once with validated inputs.
///
/// # Errors
///
/// Returns [`ActionError::Config`] before any remote call when the event
/// payload is unusable, and [`ActionError::Run`] when the orchestrator fails
/// or propagates remote failures.
pub async fn run(config: ActionConfig) -> Result<RunReport, ActionError> {
    let pull_request = load_pull_request(&config.event_path)?;
    let extractor = TaskLinkExtractor::new(config.trigger_phrase)?;
    let tracker = Arc::new(AsanaClient::new(&config.client).map_err(ActionError::Client)?);
    let orchestrator = LinkOrchestrator::new(
        tracker,
        extractor,
        config.orchestrator,
        Arc::new(DefaultClock),
    );
    Ok(orchestrator.run(&pull_request).await?)
}
