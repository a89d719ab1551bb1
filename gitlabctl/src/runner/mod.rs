//! Orchestrates a `verify` run: resolve projects, then audit their branches.

mod error;

pub use error::RunnerError;

use crate::audit::audit_branches;
use crate::config::Config;
use crate::discovery::{deduplicate_projects, resolve_projects};
use crate::gitlab::{GitlabClient, Project};
use crate::summary::VerifyReport;
use tracing::{debug, info};

/// Runs branch verifications against one GitLab instance.
#[derive(Debug)]
pub struct Runner {
    client: GitlabClient,
}

impl Runner {
    /// Builds a runner and its shared HTTP client from the configuration.
    pub fn new(config: Config) -> Result<Self, RunnerError> {
        let client = GitlabClient::new(config)?;
        Ok(Self { client })
    }

    /// Builds a runner around an existing client.
    pub fn with_client(client: GitlabClient) -> Self {
        Self { client }
    }

    /// Finds the projects matching `terms` that are missing `branch`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::EmptyBranch`] for a blank branch name, or the
    /// first GitLab error from either phase. Nothing partial is returned.
    pub async fn verify(&self, terms: &[String], branch: &str) -> Result<VerifyReport, RunnerError> {
        if branch.trim().is_empty() {
            return Err(RunnerError::EmptyBranch);
        }

        info!(terms = terms.len(), branch, "Verifying branch");

        let projects = deduplicate_projects(resolve_projects(&self.client, terms).await?);
        let missing = audit_branches(&self.client, &projects, branch).await?;

        let report = VerifyReport::new(branch, projects.len(), missing);
        debug!(
            target_branch = %report.branch,
            projects = ?paths(&projects),
            missing = ?paths(&report.missing),
            "Found projects missing branch"
        );

        Ok(report)
    }
}

fn paths(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(Project::path_with_namespace).collect()
}
