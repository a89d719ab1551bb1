//! Project records returned by the GitLab API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A GitLab project, decoded from one element of a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: u64,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    path_with_namespace: String,
}

impl Project {
    /// Creates a project record.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        description: Option<String>,
        path_with_namespace: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description,
            path_with_namespace: path_with_namespace.into(),
        }
    }

    /// Platform-assigned project ID.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional project description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fully qualified `group/subgroup/project` path.
    pub fn path_with_namespace(&self) -> &str {
        &self.path_with_namespace
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_with_namespace)
    }
}

/// Outcome of a single branch existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStatus {
    /// The branch exists (HTTP 200).
    Present,
    /// The branch does not exist (HTTP 404).
    Missing,
}
