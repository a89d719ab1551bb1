//! In-process stand-in for the GitLab REST API.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use gitlabctl::{Config, GitlabClient, PRIVATE_TOKEN_HEADER};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const TOKEN: &str = "secret-token";

/// Canned responses for the project search and branch endpoints.
#[derive(Default)]
pub struct MockGitlab {
    searches: HashMap<String, (StatusCode, String)>,
    branches: HashMap<(u64, String), StatusCode>,
    search_delays: HashMap<String, Duration>,
    branch_delays: HashMap<u64, Duration>,
    requests: AtomicUsize,
}

impl MockGitlab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `?search={term}` with `body` and status 200.
    pub fn search(self, term: &str, body: serde_json::Value) -> Self {
        self.search_raw(term, StatusCode::OK, &body.to_string())
    }

    /// Answers `?search={term}` with an arbitrary status and body.
    pub fn search_raw(mut self, term: &str, status: StatusCode, body: &str) -> Self {
        self.searches
            .insert(term.to_string(), (status, body.to_string()));
        self
    }

    /// Answers the branch lookup for `project_id`/`branch`. Unknown lookups
    /// get 404.
    pub fn branch(mut self, project_id: u64, branch: &str, status: StatusCode) -> Self {
        self.branches
            .insert((project_id, branch.to_string()), status);
        self
    }

    /// Holds the response to `?search={term}` back for `delay`.
    pub fn slow_search(mut self, term: &str, delay: Duration) -> Self {
        self.search_delays.insert(term.to_string(), delay);
        self
    }

    /// Holds every branch response for `project_id` back for `delay`.
    pub fn slow_branch(mut self, project_id: u64, delay: Duration) -> Self {
        self.branch_delays.insert(project_id, delay);
        self
    }

    /// Starts serving on a random local port and returns the base API URL.
    pub async fn serve(self) -> (String, Arc<MockGitlab>) {
        let mock = Arc::new(self);
        let app = Router::new()
            .route("/api/v4/projects", get(search_projects))
            .route(
                "/api/v4/projects/:id/repository/branches/:branch",
                get(get_branch),
            )
            .with_state(Arc::clone(&mock));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/api/v4"), mock)
    }

    /// Number of requests received so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(PRIVATE_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        == Some(TOKEN)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({"message": "401 Unauthorized"})),
    )
        .into_response()
}

async fn search_projects(
    State(mock): State<Arc<MockGitlab>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.requests.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return unauthorized();
    }

    let term = params.get("search").cloned().unwrap_or_default();
    if let Some(delay) = mock.search_delays.get(&term) {
        tokio::time::sleep(*delay).await;
    }
    let (status, body) = mock
        .searches
        .get(&term)
        .cloned()
        .unwrap_or((StatusCode::OK, "[]".to_string()));

    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn get_branch(
    State(mock): State<Arc<MockGitlab>>,
    headers: HeaderMap,
    Path((id, branch)): Path<(u64, String)>,
) -> Response {
    mock.requests.fetch_add(1, Ordering::SeqCst);
    if !authorized(&headers) {
        return unauthorized();
    }

    if let Some(delay) = mock.branch_delays.get(&id) {
        tokio::time::sleep(*delay).await;
    }

    mock.branches
        .get(&(id, branch))
        .copied()
        .unwrap_or(StatusCode::NOT_FOUND)
        .into_response()
}

pub fn project_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "path_with_namespace": format!("grp/{name}"),
    })
}

pub fn client(base_url: &str) -> GitlabClient {
    GitlabClient::new(Config::new(base_url, TOKEN)).unwrap()
}

/// Mock with the `alpha` and `beta` projects used across the scenarios.
pub fn alpha_beta() -> MockGitlab {
    MockGitlab::new()
        .search("alpha", json!([project_json(1, "alpha")]))
        .search("beta", json!([project_json(2, "beta")]))
}

pub fn terms(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
