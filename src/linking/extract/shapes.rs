//! Ordered table of the Asana task URL shapes.
//!
//! Asana has changed its task URL layout over time. Each shape is a pattern
//! over the complete URL, and shapes are tried in table order; the first
//! match wins. Adding a shape means adding a row here and nothing else.

use crate::linking::domain::TaskGid;
use regex::Regex;
use std::fmt;

/// Scheme and host accepted for task links, case-insensitive.
pub(crate) const ASANA_HOST_PATTERN: &str = r"(?i:https?://app\.asana\.com)";

/// Terminates the task id: end of URL or the start of trailing path/query noise.
const TASK_ID_BOUNDARY: &str = r"(?:[/?#]|$)";

/// Known task URL layouts, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkShape {
    /// `/{version}/{workspace}/project/{project}/task/{task}`
    VersionedWithProject,
    /// `/{version}/{workspace}/task/{task}`
    VersionedTask,
    /// `/0/{project}/{task}`, optionally followed by `/f`.
    Legacy,
}

impl LinkShape {
    /// Every shape in resolution priority order.
    pub const ALL: [Self; 3] = [Self::VersionedWithProject, Self::VersionedTask, Self::Legacy];

    const fn path_pattern(self) -> &'static str {
        match self {
            Self::VersionedWithProject => {
                r"/(?P<version>\d+)/(?P<workspace>\d+)/project/(?P<project>\d+)/task/(?P<task>\d+)"
            }
            Self::VersionedTask => r"/(?P<version>\d+)/(?P<workspace>\d+)/task/(?P<task>\d+)",
            Self::Legacy => r"/0/(?P<project>\d+)/(?P<task>\d+)",
        }
    }

    /// Returns a short stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VersionedWithProject => "versioned_with_project",
            Self::VersionedTask => "versioned_task",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for LinkShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task link resolved to its task gid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLink {
    gid: TaskGid,
    shape: LinkShape,
    url: String,
}

impl TaskLink {
    /// Returns the resolved task gid.
    #[must_use]
    pub const fn gid(&self) -> &TaskGid {
        &self.gid
    }

    /// Returns the shape the URL matched.
    #[must_use]
    pub const fn shape(&self) -> LinkShape {
        self.shape
    }

    /// Returns the URL as written in the text.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Consumes the link, returning the task gid.
    #[must_use]
    pub fn into_gid(self) -> TaskGid {
        self.gid
    }
}

/// Compiled shape table.
#[derive(Debug, Clone)]
pub struct LinkShapeTable {
    shapes: Vec<(LinkShape, Regex)>,
}

impl LinkShapeTable {
    /// Compiles every shape pattern.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] when a pattern fails to compile.
    pub fn compile() -> Result<Self, regex::Error> {
        let shapes = LinkShape::ALL
            .iter()
            .map(|shape| {
                let pattern = format!(
                    "^{ASANA_HOST_PATTERN}{}{TASK_ID_BOUNDARY}",
                    shape.path_pattern()
                );
                Regex::new(&pattern).map(|regex| (*shape, regex))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { shapes })
    }

    /// Resolves a URL to a task link using the first matching shape.
    ///
    /// Returns `None` when no shape yields a task segment.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Option<TaskLink> {
        self.shapes.iter().find_map(|(shape, regex)| {
            let captures = regex.captures(url)?;
            let gid = TaskGid::new(captures.name("task")?.as_str()).ok()?;
            Some(TaskLink {
                gid,
                shape: *shape,
                url: url.to_owned(),
            })
        })
    }
}
