//! Links a pull request to the Asana tasks its description references.
//!
//! Usage:
//!
//! ```text
//! asana-pr-linker --asana-pat <token> --trigger-phrase 'Asana:' \
//!     --targets '[{"project":"Web","section":"In Review"}]'
//! ```
//!
//! Every flag falls back to the matching GitHub Action input variable
//! (`INPUT_ASANA-PAT`, `INPUT_TRIGGER-PHRASE`, ...), and the pull request is
//! read from the payload at `GITHUB_EVENT_PATH`. The process exits non-zero
//! when the inputs are invalid, or when `fail-on-error` is set and any Asana
//! call failed.

use asana_pr_linker::action::{self, ActionConfig, ActionError, Cli, TelemetryError};
use clap::Parser;
use std::process::ExitCode;
use tokio::runtime::Builder;
use tracing::{error, info};

fn main() -> Result<ExitCode, TelemetryError> {
    let cli = Cli::parse();
    action::init_tracing()?;

    match run(cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            error!(error = %err, "asana-pr-linker failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<(), ActionError> {
    let config = ActionConfig::try_from(cli)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(ActionError::Runtime)?;
    let report = runtime.block_on(action::run(config))?;
    info!(
        run_id = %report.run_id,
        tasks = report.tasks.len(),
        failed_tasks = report.failed_task_count(),
        "run complete"
    );
    Ok(())
}
