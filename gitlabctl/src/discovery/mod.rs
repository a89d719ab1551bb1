//! Project discovery using the GitLab project search API.
//!
//! Each search term becomes one concurrent `GET /projects?search=` request.
//! Resolution is all-or-nothing: one failed search fails the whole call.

use crate::fan_out::fan_out;
use crate::gitlab::{GitlabClient, GitlabError, Project};
use tracing::{debug, info, info_span, Instrument};

/// Resolves search terms into the projects they match.
///
/// # Arguments
///
/// * `client` - Authenticated GitLab client
/// * `terms` - Project name fragments; may be empty
///
/// # Returns
///
/// All matching projects from every term, flattened into one vector. The
/// order is not meaningful to callers.
///
/// # Errors
///
/// Returns the first [`GitlabError`] raised by any search. Outstanding
/// searches are cancelled and no partial results are returned.
pub async fn resolve_projects(
    client: &GitlabClient,
    terms: &[String],
) -> Result<Vec<Project>, GitlabError> {
    let span = info_span!("resolve", terms = terms.len());

    async {
        if terms.is_empty() {
            debug!("No search terms given");
            return Ok(Vec::new());
        }

        let pages = fan_out(terms.to_vec(), |worker_id, term| {
            let client = client.clone();
            async move {
                debug!(term = %term, worker_id, "Searching projects");
                let projects = client.search_projects(&term).await?;
                debug!(
                    term = %term,
                    worker_id,
                    count = projects.len(),
                    "Project search complete"
                );
                Ok::<_, GitlabError>(projects)
            }
        })
        .await?;

        let projects: Vec<Project> = pages.into_iter().flatten().collect();
        info!(count = projects.len(), "Resolved projects");
        Ok(projects)
    }
    .instrument(span)
    .await
}

/// Splits a comma-separated `--projects` value into search terms.
///
/// Whitespace around each term is trimmed and empty terms are dropped, so an
/// empty string yields no terms.
pub fn parse_search_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes repeated projects, keeping the first occurrence of each ID.
///
/// Several search terms can match the same project.
pub fn deduplicate_projects(projects: Vec<Project>) -> Vec<Project> {
    let mut seen = std::collections::HashSet::new();
    projects
        .into_iter()
        .filter(|project| seen.insert(project.id()))
        .collect()
}
