//! GitLab API error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the GitLab API.
///
/// Any of these fails the task that produced it, and with it the whole
/// resolve or audit phase.
#[derive(Debug, Error)]
pub enum GitlabError {
    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid GitLab URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Failed to build the HTTP client.
    #[error("failed to create HTTP client: {0}")]
    ClientInit(#[source] reqwest::Error),

    /// The request could not be constructed (bad URL or header value).
    #[error("failed to create request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    /// Connection failure, timeout or broken response body.
    #[error("failed http request to '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The project search endpoint answered with a non-success status.
    #[error("project search for '{term}' failed with status code '{status}'")]
    SearchStatus { term: String, status: StatusCode },

    /// The project search body was not a JSON array of projects.
    #[error("failed to decode project search response for '{term}': {source}")]
    Decode {
        term: String,
        #[source]
        source: serde_json::Error,
    },

    /// The branch endpoint answered with something other than 200 or 404.
    #[error("unexpected status code '{status}' for '{project}' Gitlab project")]
    UnexpectedStatus { status: StatusCode, project: String },

    /// A request task panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
