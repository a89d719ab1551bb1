//! Outcome of a single `verify` run.

use crate::gitlab::Project;
use std::fmt;

/// Printed when no checked project is missing the branch.
pub const ALL_PASS_MESSAGE: &str = "All projects pass validation";

/// Projects found missing a branch during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Branch that was looked for.
    pub branch: String,

    /// Number of distinct projects whose branches were checked.
    pub projects_checked: usize,

    /// Projects without the branch, in audit order.
    pub missing: Vec<Project>,
}

impl VerifyReport {
    /// Creates a report.
    #[must_use]
    pub fn new(branch: impl Into<String>, projects_checked: usize, missing: Vec<Project>) -> Self {
        Self {
            branch: branch.into(),
            projects_checked,
            missing,
        }
    }

    /// Returns true if every checked project has the branch.
    #[must_use]
    pub fn all_pass(&self) -> bool {
        self.missing.is_empty()
    }

    /// Namespace paths of the projects missing the branch.
    pub fn missing_paths(&self) -> impl Iterator<Item = &str> {
        self.missing.iter().map(Project::path_with_namespace)
    }
}

/// Renders the single output line: space-separated namespace paths, or
/// [`ALL_PASS_MESSAGE`].
impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_pass() {
            return f.write_str(ALL_PASS_MESSAGE);
        }
        let paths: Vec<&str> = self.missing_paths().collect();
        f.write_str(&paths.join(" "))
    }
}
