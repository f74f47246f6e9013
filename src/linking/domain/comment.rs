//! Task comment templates.

use super::{LinkingDomainError, PullRequest};
use minijinja::Environment;
use serde_json::{Map, Value};

/// Template for the comment posted on every linked task.
///
/// A template containing `{{` is rendered with `minijinja`, exposing
/// `pull_request.url`, `pull_request.number` and `pull_request.title`. Any
/// other template gets the pull request URL appended after a single space.
///
/// # Examples
///
///     use asana_pr_linker::linking::domain::{CommentTemplate, PullRequest};
///
///     let pr = PullRequest::new("https://github.com/acme/web/pull/7", "");
///     let plain = CommentTemplate::new("Linked PR:");
///     assert_eq!(
///         plain.render(&pr).expect("render").as_deref(),
///         Some("Linked PR: https://github.com/acme/web/pull/7"),
///     );
///
///     let templated = CommentTemplate::new("PR {{ pull_request.url }} opened");
///     assert_eq!(
///         templated.render(&pr).expect("render").as_deref(),
///         Some("PR https://github.com/acme/web/pull/7 opened"),
///     );
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentTemplate(String);

impl CommentTemplate {
    /// Wraps a raw template string.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns `true` when no comment should be posted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Renders the final comment text for a pull request.
    ///
    /// Returns `Ok(None)` for an empty template.
    ///
    /// # Errors
    ///
    /// Returns [`LinkingDomainError::TemplateRender`] when a `minijinja`
    /// template fails to parse or render.
    pub fn render(&self, pull_request: &PullRequest) -> Result<Option<String>, LinkingDomainError> {
        if self.is_empty() {
            return Ok(None);
        }
        if !self.0.contains("{{") {
            return Ok(Some(format!("{} {}", self.0, pull_request.url())));
        }

        let environment = Environment::new();
        environment
            .render_str(&self.0, build_template_context(pull_request))
            .map(Some)
            .map_err(|err| LinkingDomainError::TemplateRender(err.to_string()))
    }
}

fn build_template_context(pull_request: &PullRequest) -> Map<String, Value> {
    let mut pr = Map::new();
    pr.insert("url".to_owned(), Value::String(pull_request.url().to_owned()));
    pr.insert(
        "number".to_owned(),
        pull_request.number().map_or(Value::Null, Value::from),
    );
    pr.insert(
        "title".to_owned(),
        pull_request
            .title()
            .map_or(Value::Null, |title| Value::String(title.to_owned())),
    );

    let mut context = Map::new();
    context.insert("pull_request".to_owned(), Value::Object(pr));
    context
}
