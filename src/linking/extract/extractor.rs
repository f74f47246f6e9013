//! Trigger-phrase matcher over pull request descriptions.

use super::shapes::{ASANA_HOST_PATTERN, LinkShapeTable, TaskLink};
use crate::linking::domain::TaskGid;
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while building an extractor.
#[derive(Debug, Clone, Error)]
pub enum ExtractorError {
    /// The trigger phrase is empty after trimming.
    #[error("trigger phrase must not be empty")]
    EmptyTriggerPhrase,

    /// A link pattern failed to compile.
    #[error("invalid task link pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A trigger-qualified Asana link whose URL carries no task segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed Asana task link '{url}' at byte {offset}")]
pub struct MalformedReference {
    /// URL as written in the text.
    pub url: String,
    /// Byte offset of the URL in the scanned text.
    pub offset: usize,
}

/// Finds Asana task links that follow a trigger phrase.
///
/// The phrase is matched literally. Emphasis markers (`*`, `_`, `~`) and
/// whitespace may surround the phrase and the Markdown link that follows it.
///
/// # Examples
///
///     use asana_pr_linker::linking::extract::TaskLinkExtractor;
///
///     let extractor = TaskLinkExtractor::new("Asana:").expect("valid phrase");
///     let body = "**Asana:** [Fix bug](https://app.asana.com/0/0/12345/f)";
///     let ids: Vec<String> = extractor
///         .extract(body)
///         .map(|gid| gid.as_str().to_owned())
///         .collect();
///     assert_eq!(ids, vec!["12345".to_owned()]);
#[derive(Debug, Clone)]
pub struct TaskLinkExtractor {
    trigger_phrase: String,
    matcher: Regex,
    shapes: LinkShapeTable,
}

impl TaskLinkExtractor {
    /// Builds an extractor for the given trigger phrase.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::EmptyTriggerPhrase`] for a blank phrase and
    /// [`ExtractorError::Pattern`] when pattern compilation fails.
    pub fn new(trigger_phrase: impl Into<String>) -> Result<Self, ExtractorError> {
        let phrase = trigger_phrase.into();
        if phrase.trim().is_empty() {
            return Err(ExtractorError::EmptyTriggerPhrase);
        }

        let pattern = format!(
            r"{trigger}[*_~]*\s*[*_~]*\[(?P<text>[^\]]*)\]\(\s*(?P<url>{ASANA_HOST_PATTERN}/[^\s)]*)\s*\)",
            trigger = regex::escape(&phrase),
        );
        Ok(Self {
            trigger_phrase: phrase,
            matcher: Regex::new(&pattern)?,
            shapes: LinkShapeTable::compile()?,
        })
    }

    /// Returns the trigger phrase.
    #[must_use]
    pub fn trigger_phrase(&self) -> &str {
        &self.trigger_phrase
    }

    /// Returns the compiled shape table.
    #[must_use]
    pub const fn shapes(&self) -> &LinkShapeTable {
        &self.shapes
    }

    /// Lazily scans `text`, yielding every trigger-qualified link in order.
    ///
    /// Each call starts a fresh scan from the beginning of `text`.
    pub fn scan<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = Result<TaskLink, MalformedReference>> + 'a {
        self.matcher.captures_iter(text).filter_map(move |captures| {
            let url = captures.name("url")?;
            Some(
                self.shapes
                    .resolve(url.as_str())
                    .ok_or_else(|| MalformedReference {
                        url: url.as_str().to_owned(),
                        offset: url.start(),
                    }),
            )
        })
    }

    /// Lazily yields the task gid of every valid link in `text`.
    ///
    /// Malformed links are logged and skipped; they never stop the scan.
    pub fn extract<'a>(&'a self, text: &'a str) -> impl Iterator<Item = TaskGid> + 'a {
        self.scan(text).filter_map(move |result| match result {
            Ok(link) => {
                info!(
                    task_gid = %link.gid(),
                    shape = %link.shape(),
                    url = link.url(),
                    "found Asana task link"
                );
                Some(link.into_gid())
            }
            Err(reference) => {
                warn!(
                    url = %reference.url,
                    trigger_phrase = %self.trigger_phrase,
                    "invalid Asana task URL after the trigger phrase"
                );
                None
            }
        })
    }
}
