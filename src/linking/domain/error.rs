//! Error types for linking domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing linking domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkingDomainError {
    /// The task gid is empty or not numeric.
    #[error("invalid Asana task gid '{0}', expected a numeric identifier")]
    InvalidTaskGid(String),

    /// A target names an empty project.
    #[error("target project name must not be empty")]
    EmptyTargetProject,

    /// A target names an empty section.
    #[error("target section name must not be empty (project '{0}')")]
    EmptyTargetSection(String),

    /// The targets input is not a JSON array of `{project, section}` objects.
    #[error("invalid targets JSON: {0}")]
    InvalidTargets(String),

    /// The comment template could not be rendered.
    #[error("failed to render task comment template: {0}")]
    TemplateRender(String),
}
