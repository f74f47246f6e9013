//! Pull request values carried from the triggering event.

use serde::{Deserialize, Serialize};

/// The pull request whose description references Asana tasks.
///
/// # Examples
///
///     use asana_pr_linker::linking::domain::PullRequest;
///
///     let pr = PullRequest::new("https://github.com/acme/web/pull/42", "Fixes things")
///         .with_number(42)
///         .with_title("Fix login");
///     assert_eq!(pr.number(), Some(42));
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    url: String,
    body: String,
    number: Option<u64>,
    title: Option<String>,
}

impl PullRequest {
    /// Creates a pull request from its canonical URL and description body.
    #[must_use]
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
            number: None,
            title: None,
        }
    }

    /// Sets the pull request number.
    #[must_use]
    pub const fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Sets the pull request title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the canonical (HTML) pull request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the description body; empty when the event carried none.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the pull request number, when known.
    #[must_use]
    pub const fn number(&self) -> Option<u64> {
        self.number
    }

    /// Returns the pull request title, when known.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
