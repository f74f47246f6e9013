//! Identifier types for Asana resources.

use super::LinkingDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Asana task global identifier as found in task links.
///
/// Asana gids are opaque strings, but every gid that appears in a task URL is
/// a run of ASCII digits, so construction rejects anything else.
///
/// # Examples
///
///     use asana_pr_linker::linking::domain::TaskGid;
///
///     let gid = TaskGid::new("1204531981").expect("valid gid");
///     assert_eq!(gid.as_str(), "1204531981");
///     assert!(TaskGid::new("12a4").is_err());
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskGid(String);

impl TaskGid {
    /// Creates a validated task gid.
    ///
    /// # Errors
    ///
    /// Returns [`LinkingDomainError::InvalidTaskGid`] when the value is empty
    /// or contains anything other than ASCII digits.
    pub fn new(value: impl Into<String>) -> Result<Self, LinkingDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(LinkingDomainError::InvalidTaskGid(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the gid as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskGid {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asana project global identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectGid(String);

impl ProjectGid {
    /// Wraps a project gid returned by the tracker.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the gid as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asana section global identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionGid(String);

impl SectionGid {
    /// Wraps a section gid returned by the tracker.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the gid as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
