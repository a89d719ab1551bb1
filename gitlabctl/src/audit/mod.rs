//! Branch auditing across projects.

use crate::fan_out::fan_out;
use crate::gitlab::{BranchStatus, GitlabClient, GitlabError, Project};
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

/// Returns the projects that do not have `branch`.
///
/// One branch lookup runs per project, all concurrently. A 404 marks the
/// project as missing the branch, a 200 as having it.
///
/// # Returns
///
/// The missing-branch projects in the same relative order as `projects`.
///
/// # Errors
///
/// Returns the first [`GitlabError`] raised by any lookup, including
/// [`GitlabError::UnexpectedStatus`] for statuses other than 200 and 404.
/// Outstanding lookups are cancelled and no partial list is returned.
pub async fn audit_branches(
    client: &GitlabClient,
    projects: &[Project],
    branch: &str,
) -> Result<Vec<Project>, GitlabError> {
    let span = info_span!("audit", branch, projects = projects.len());

    async {
        let branch: Arc<str> = Arc::from(branch);
        let statuses = fan_out(projects.to_vec(), |worker_id, project| {
            let client = client.clone();
            let branch = Arc::clone(&branch);
            async move {
                debug!(project = %project.path_with_namespace(), worker_id, "Checking branch");
                let status = client.check_branch(&project, &branch).await?;
                debug!(
                    project = %project.path_with_namespace(),
                    worker_id,
                    missing = (status == BranchStatus::Missing),
                    "Branch check complete"
                );
                Ok::<_, GitlabError>(status)
            }
        })
        .await?;

        let missing = missing_projects(projects, &statuses);
        info!(missing = missing.len(), "Branch audit complete");
        Ok(missing)
    }
    .instrument(span)
    .await
}

/// Pairs each project with the status at the same index and keeps the
/// missing ones.
fn missing_projects(projects: &[Project], statuses: &[BranchStatus]) -> Vec<Project> {
    debug_assert_eq!(projects.len(), statuses.len());
    projects
        .iter()
        .zip(statuses)
        .filter(|(_, status)| **status == BranchStatus::Missing)
        .map(|(project, _)| project.clone())
        .collect()
}
