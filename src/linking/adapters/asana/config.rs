//! Explicit configuration for [`super::AsanaClient`].

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

/// Default Asana REST API root.
pub const DEFAULT_API_BASE: &str = "https://app.asana.com/api/1.0";

/// Task fields requested by default when reading memberships.
pub const DEFAULT_TASK_OPT_FIELDS: [&str; 2] =
    ["memberships.project.name", "memberships.section.name"];

/// Asana personal access token.
///
/// The value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AsanaToken(String);

impl AsanaToken {
    /// Wraps a token, returning `None` when it is blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let raw = value.into();
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()))
    }

    /// Exposes the secret for building the authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AsanaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AsanaToken(<redacted>)")
    }
}

/// Connection, retry and field-selection settings for the Asana client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsanaClientConfig {
    api_base: String,
    token: AsanaToken,
    request_timeout: Duration,
    retry_max_attempts: usize,
    retry_base_delay: Duration,
    opt_fields: BTreeSet<String>,
}

impl AsanaClientConfig {
    /// Creates a configuration with default endpoint, timeout and retries.
    #[must_use]
    pub fn new(token: AsanaToken) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            token,
            request_timeout: Duration::from_secs(10),
            retry_max_attempts: 3,
            retry_base_delay: Duration::from_millis(500),
            opt_fields: DEFAULT_TASK_OPT_FIELDS
                .iter()
                .map(|field| (*field).to_owned())
                .collect(),
        }
    }

    /// Overrides the API root; a trailing slash is ignored.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    /// Sets the per-request timeout. Zero is raised to one millisecond.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout.max(Duration::from_millis(1));
        self
    }

    /// Sets the retry budget. At least one attempt is always made.
    #[must_use]
    pub fn with_retry(mut self, max_attempts: usize, base_delay: Duration) -> Self {
        self.retry_max_attempts = max_attempts.max(1);
        self.retry_base_delay = base_delay;
        self
    }

    /// Replaces the task fields requested by `get_task`.
    ///
    /// Blank entries are dropped; an empty set restores the defaults.
    #[must_use]
    pub fn with_opt_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selected: BTreeSet<String> = fields
            .into_iter()
            .map(|field| field.as_ref().trim().to_owned())
            .filter(|field| !field.is_empty())
            .collect();
        if !selected.is_empty() {
            self.opt_fields = selected;
        }
        self
    }

    /// Returns the API root without trailing slash.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the access token.
    #[must_use]
    pub const fn token(&self) -> &AsanaToken {
        &self.token
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns the maximum attempts per call.
    #[must_use]
    pub const fn retry_max_attempts(&self) -> usize {
        self.retry_max_attempts
    }

    /// Returns the base backoff delay.
    #[must_use]
    pub const fn retry_base_delay(&self) -> Duration {
        self.retry_base_delay
    }

    /// Returns the task fields requested by `get_task`.
    #[must_use]
    pub const fn opt_fields(&self) -> &BTreeSet<String> {
        &self.opt_fields
    }
}
