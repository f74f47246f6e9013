//! Action inputs: command-line flags with GitHub Action environment fallbacks.
//!
//! GitHub passes every declared input as `INPUT_<NAME>`, upper-cased with
//! hyphens kept, and passes unset inputs as empty strings. Raw values are
//! therefore collected as optional strings and validated in one place by
//! [`ActionConfig::try_from`].

use crate::linking::{
    adapters::asana::{AsanaClientConfig, AsanaToken, DEFAULT_API_BASE},
    domain::{CommentTemplate, LinkingDomainError, Target},
    services::{CommentPolicy, OrchestratorConfig},
};
use camino::Utf8PathBuf;
use clap::Parser;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_RETRY_MAX_ATTEMPTS: usize = 3;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;

/// Raw action inputs.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "asana-pr-linker",
    about = "Moves the Asana tasks a pull request references and links them back",
    version
)]
pub struct Cli {
    /// Asana personal access token.
    #[arg(long, env = "INPUT_ASANA-PAT", hide_env_values = true)]
    pub asana_pat: Option<String>,

    /// JSON array of `{"project": ..., "section": ...}` placements.
    #[arg(long, env = "INPUT_TARGETS")]
    pub targets: Option<String>,

    /// Literal marker that must precede an Asana link.
    #[arg(long, env = "INPUT_TRIGGER-PHRASE")]
    pub trigger_phrase: Option<String>,

    /// Comment posted on every linked task.
    #[arg(long, env = "INPUT_TASK-COMMENT")]
    pub task_comment: Option<String>,

    /// Skip the comment when identical text is already on the task.
    #[arg(
        long,
        env = "INPUT_SKIP-DUPLICATE-COMMENTS",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub skip_duplicate_comments: Option<String>,

    /// Exit non-zero when any remote call failed.
    #[arg(
        long,
        env = "INPUT_FAIL-ON-ERROR",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub fail_on_error: Option<String>,

    /// Asana REST API root.
    #[arg(long, env = "INPUT_ASANA-API-BASE")]
    pub asana_api_base: Option<String>,

    /// Comma-separated task fields requested when reading memberships.
    #[arg(long, env = "INPUT_OPT-FIELDS")]
    pub opt_fields: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "INPUT_REQUEST-TIMEOUT-MS")]
    pub request_timeout_ms: Option<String>,

    /// Attempts per remote call, including the first.
    #[arg(long, env = "INPUT_RETRY-MAX-ATTEMPTS")]
    pub retry_max_attempts: Option<String>,

    /// Base delay of the exponential backoff in milliseconds.
    #[arg(long, env = "INPUT_RETRY-BASE-DELAY-MS")]
    pub retry_base_delay_ms: Option<String>,

    /// Path of the GitHub event payload.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<String>,
}

/// Invalid or missing action configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No Asana token was supplied.
    #[error("the asana-pat input is required")]
    MissingToken,

    /// No trigger phrase was supplied.
    #[error("the trigger-phrase input is required")]
    MissingTriggerPhrase,

    /// No event payload path was supplied.
    #[error("GITHUB_EVENT_PATH is not set")]
    MissingEventPath,

    /// The targets input is not a valid placement list.
    #[error("invalid targets input: {0}")]
    InvalidTargets(#[source] LinkingDomainError),

    /// A boolean input holds an unrecognised value.
    #[error("input {input} expects true or false, got {value:?}")]
    InvalidFlag {
        /// Input name.
        input: &'static str,
        /// Raw value.
        value: String,
    },

    /// A numeric input does not parse.
    #[error("input {input} expects a number, got {value:?}: {reason}")]
    InvalidNumber {
        /// Input name.
        input: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The event payload could not be read.
    #[error("failed to read event payload {path}: {source}")]
    EventRead {
        /// Payload path.
        path: Utf8PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The event payload is not valid JSON of the expected shape.
    #[error("failed to parse event payload {path}: {source}")]
    EventParse {
        /// Payload path.
        path: Utf8PathBuf,
        /// Decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// The event payload carries no pull request.
    #[error("event payload {path} has no pull_request; run the action on pull_request events")]
    MissingPullRequest {
        /// Payload path.
        path: Utf8PathBuf,
    },
}

/// Validated configuration for one action run.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Asana client settings.
    pub client: AsanaClientConfig,
    /// Marker that qualifies task links.
    pub trigger_phrase: String,
    /// Placements, comment and failure policy.
    pub orchestrator: OrchestratorConfig,
    /// Location of the GitHub event payload.
    pub event_path: Utf8PathBuf,
}

impl TryFrom<Cli> for ActionConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let token = present(cli.asana_pat)
            .and_then(AsanaToken::new)
            .ok_or(ConfigError::MissingToken)?;
        let trigger_phrase = present(cli.trigger_phrase).ok_or(ConfigError::MissingTriggerPhrase)?;
        let event_path = present(cli.event_path)
            .map(Utf8PathBuf::from)
            .ok_or(ConfigError::MissingEventPath)?;

        let targets = match present(cli.targets) {
            Some(raw) => Target::parse_list(&raw).map_err(ConfigError::InvalidTargets)?,
            None => Vec::new(),
        };
        let comment_template = present(cli.task_comment)
            .map(CommentTemplate::new)
            .unwrap_or_default();
        let comment_policy = CommentPolicy {
            skip_duplicates: parse_flag("skip-duplicate-comments", cli.skip_duplicate_comments)?,
        };
        let propagate_failures = parse_flag("fail-on-error", cli.fail_on_error)?;

        let request_timeout_ms = parse_number(
            "request-timeout-ms",
            cli.request_timeout_ms,
            DEFAULT_REQUEST_TIMEOUT_MS,
        )?;
        let retry_max_attempts = parse_number(
            "retry-max-attempts",
            cli.retry_max_attempts,
            DEFAULT_RETRY_MAX_ATTEMPTS,
        )?;
        let retry_base_delay_ms = parse_number(
            "retry-base-delay-ms",
            cli.retry_base_delay_ms,
            DEFAULT_RETRY_BASE_DELAY_MS,
        )?;

        let mut client = AsanaClientConfig::new(token)
            .with_api_base(present(cli.asana_api_base).unwrap_or_else(|| DEFAULT_API_BASE.to_owned()))
            .with_request_timeout(Duration::from_millis(request_timeout_ms))
            .with_retry(
                retry_max_attempts,
                Duration::from_millis(retry_base_delay_ms),
            );
        if let Some(fields) = present(cli.opt_fields) {
            client = client.with_opt_fields(fields.split(','));
        }

        Ok(Self {
            client,
            trigger_phrase,
            orchestrator: OrchestratorConfig {
                targets,
                comment_template,
                comment_policy,
                propagate_failures,
            },
            event_path,
        })
    }
}

/// Treats blank inputs as absent.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn parse_flag(input: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = present(value) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { input, value: raw }),
    }
}

fn parse_number<N>(input: &'static str, value: Option<String>, default: N) -> Result<N, ConfigError>
where
    N: FromStr,
    N::Err: Display,
{
    let Some(raw) = present(value) else {
        return Ok(default);
    };
    raw.trim()
        .parse()
        .map_err(|err: N::Err| ConfigError::InvalidNumber {
            input,
            reason: err.to_string(),
            value: raw.clone(),
        })
}
