//! GitHub event payload loading.

use super::config::ConfigError;
use crate::linking::domain::PullRequest;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    html_url: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    number: Option<u64>,
    #[serde(default)]
    title: Option<String>,
}

impl PullRequestPayload {
    fn into_pull_request(self) -> PullRequest {
        let mut pull_request = PullRequest::new(self.html_url, self.body.unwrap_or_default());
        if let Some(number) = self.number {
            pull_request = pull_request.with_number(number);
        }
        if let Some(title) = self.title {
            pull_request = pull_request.with_title(title);
        }
        pull_request
    }
}

/// Reads the pull request from the event payload at `path`.
///
/// A `null` description is treated as empty.
///
/// # Errors
///
/// Returns [`ConfigError::EventRead`] when the file cannot be read,
/// [`ConfigError::EventParse`] when it is not a valid payload, and
/// [`ConfigError::MissingPullRequest`] when the event is not about a pull
/// request.
pub fn load_pull_request(path: &Utf8Path) -> Result<PullRequest, ConfigError> {
    let contents = read_payload(path).map_err(|source| ConfigError::EventRead {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: EventPayload =
        serde_json::from_str(&contents).map_err(|source| ConfigError::EventParse {
            path: path.to_path_buf(),
            source,
        })?;
    payload
        .pull_request
        .map(PullRequestPayload::into_pull_request)
        .ok_or_else(|| ConfigError::MissingPullRequest {
            path: path.to_path_buf(),
        })
}

fn read_payload(path: &Utf8Path) -> std::io::Result<String> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    let dir = Dir::open_ambient_dir(&parent, ambient_authority())?;
    dir.read_to_string(file_name)
}
