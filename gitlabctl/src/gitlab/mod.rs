//! Authenticated access to the GitLab REST API.
//!
//! [`GitlabClient`] wraps one shared [`reqwest::Client`] and the read-only
//! [`Config`]. It is cheap to clone, so every concurrent task gets its own
//! handle to the same connection pool.

mod error;
mod project;

pub use error::GitlabError;
pub use project::{BranchStatus, Project};

use crate::config::Config;
use reqwest::{IntoUrl, Method, Request, Response, StatusCode};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Header carrying the personal access token.
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Client for the handful of GitLab endpoints this tool needs.
#[derive(Debug, Clone)]
pub struct GitlabClient {
    http: reqwest::Client,
    config: Arc<Config>,
    base_url: Url,
}

impl GitlabClient {
    /// Builds a client with the timeout and TLS settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::ClientInit`] if the HTTP client cannot be
    /// created, or [`GitlabError::InvalidBaseUrl`] for an unusable base URL.
    pub fn new(config: Config) -> Result<Self, GitlabError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .danger_accept_invalid_certs(config.insecure())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GitlabError::ClientInit)?;
        Self::with_http_client(http, config)
    }

    /// Builds a client around an existing [`reqwest::Client`].
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::InvalidBaseUrl`] for an unusable base URL.
    pub fn with_http_client(http: reqwest::Client, config: Config) -> Result<Self, GitlabError> {
        let base_url = parse_base_url(config.gitlab_url())?;
        Ok(Self {
            http,
            config: Arc::new(config),
            base_url,
        })
    }

    /// Creates a request carrying the `PRIVATE-TOKEN` header.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::BuildRequest`] if the URL does not parse or the
    /// token is not a valid header value.
    pub fn build_request<U: IntoUrl>(&self, method: Method, url: U) -> Result<Request, GitlabError> {
        self.http
            .request(method, url)
            .header(PRIVATE_TOKEN_HEADER, self.config.access_token())
            .build()
            .map_err(GitlabError::BuildRequest)
    }

    /// `{base}/projects?search={term}`
    pub fn search_url(&self, term: &str) -> Result<Url, GitlabError> {
        let mut url = self.endpoint(&["projects"])?;
        url.query_pairs_mut().append_pair("search", term);
        Ok(url)
    }

    /// `{base}/projects/{id}/repository/branches/{branch}`
    ///
    /// The branch is a single path segment, so `feature/x` is sent as
    /// `feature%2Fx`.
    pub fn branch_url(&self, project_id: u64, branch: &str) -> Result<Url, GitlabError> {
        let id = project_id.to_string();
        self.endpoint(&["projects", &id, "repository", "branches", branch])
    }

    /// Runs one project search and decodes the matching projects.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success statuses and bodies that are
    /// not a JSON array of projects.
    pub async fn search_projects(&self, term: &str) -> Result<Vec<Project>, GitlabError> {
        let url = self.search_url(term)?;
        let request = self.build_request(Method::GET, url)?;
        let response = self.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitlabError::SearchStatus {
                term: term.to_string(),
                status,
            });
        }

        let url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|source| GitlabError::Transport { url, source })?;

        serde_json::from_slice(&body).map_err(|source| GitlabError::Decode {
            term: term.to_string(),
            source,
        })
    }

    /// Checks whether `project` has `branch`.
    ///
    /// # Errors
    ///
    /// Fails on transport errors and on any status other than 200 or 404.
    pub async fn check_branch(
        &self,
        project: &Project,
        branch: &str,
    ) -> Result<BranchStatus, GitlabError> {
        let url = self.branch_url(project.id(), branch)?;
        let request = self.build_request(Method::GET, url)?;
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(BranchStatus::Missing),
            StatusCode::OK => {
                debug!(branch, project = %project.path_with_namespace(), "Branch exists");
                Ok(BranchStatus::Present)
            }
            status => Err(GitlabError::UnexpectedStatus {
                status,
                project: project.path_with_namespace().to_string(),
            }),
        }
    }

    async fn send(&self, request: Request) -> Result<Response, GitlabError> {
        let url = request.url().to_string();
        self.http
            .execute(request)
            .await
            .map_err(|source| GitlabError::Transport { url, source })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitlabError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| cannot_be_a_base(&self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, GitlabError> {
    let url = Url::parse(raw).map_err(|e| GitlabError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(cannot_be_a_base(&url));
    }
    Ok(url)
}

fn cannot_be_a_base(url: &Url) -> GitlabError {
    GitlabError::InvalidBaseUrl {
        url: url.to_string(),
        reason: "URL cannot be used as a base".to_string(),
    }
}
