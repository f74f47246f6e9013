//! Desired (project, section) placements for linked tasks.

use super::LinkingDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A desired section placement inside a named project.
///
/// Projects and sections are addressed by their display names, exactly as
/// the workflow author writes them in the `targets` input.
///
/// # Examples
///
///     use asana_pr_linker::linking::domain::Target;
///
///     let targets = Target::parse_list(r#"[{"project": "Web", "section": "In Review"}]"#)
///         .expect("valid targets");
///     assert_eq!(targets[0].to_string(), "Web/In Review");
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct Target {
    project: String,
    section: String,
}

#[derive(Deserialize)]
struct RawTarget {
    project: String,
    section: String,
}

impl TryFrom<RawTarget> for Target {
    type Error = LinkingDomainError;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        Self::new(raw.project, raw.section)
    }
}

impl Target {
    /// Creates a validated target.
    ///
    /// # Errors
    ///
    /// Returns [`LinkingDomainError::EmptyTargetProject`] or
    /// [`LinkingDomainError::EmptyTargetSection`] when a name is blank.
    pub fn new(
        project: impl Into<String>,
        section: impl Into<String>,
    ) -> Result<Self, LinkingDomainError> {
        let project_name = project.into();
        let section_name = section.into();
        if project_name.trim().is_empty() {
            return Err(LinkingDomainError::EmptyTargetProject);
        }
        if section_name.trim().is_empty() {
            return Err(LinkingDomainError::EmptyTargetSection(project_name));
        }
        Ok(Self {
            project: project_name,
            section: section_name,
        })
    }

    /// Parses the JSON `targets` input.
    ///
    /// Blank input yields no targets.
    ///
    /// # Errors
    ///
    /// Returns [`LinkingDomainError::InvalidTargets`] when the input is not a
    /// JSON array of `{project, section}` objects with non-empty names.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, LinkingDomainError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(raw).map_err(|err| LinkingDomainError::InvalidTargets(err.to_string()))
    }

    /// Returns the project name.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the section name.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.section)
    }
}
