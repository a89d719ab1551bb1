//! Configuration loading.
//!
//! The configuration is a small JSON file:
//!
//! ```json
//! {
//!     "gitlabURL": "https://gitlab.example.com/api/v4",
//!     "accessToken": "glpat-...",
//!     "requestTimeoutSecs": 30,
//!     "insecure": false
//! }
//! ```
//!
//! `GITLAB_URL` and `ACCESS_TOKEN` override the file values when set to a
//! non-empty string. Validation runs after the overrides.

mod error;

pub use error::ConfigError;

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Environment variable overriding [`Config::gitlab_url`].
pub const GITLAB_URL_ENV: &str = "GITLAB_URL";

/// Environment variable overriding [`Config::access_token`].
pub const ACCESS_TOKEN_ENV: &str = "ACCESS_TOKEN";

/// Per-request timeout used when the file does not set one.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Connection settings for the GitLab API.
///
/// Read-only once loaded; shared between all request tasks.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base API URL, e.g. `https://gitlab.example.com/api/v4`.
    #[serde(rename = "gitlabURL", default)]
    gitlab_url: String,

    /// Personal access token sent as `PRIVATE-TOKEN`.
    #[serde(rename = "accessToken", default)]
    access_token: String,

    /// Timeout applied to every HTTP request.
    #[serde(rename = "requestTimeoutSecs", default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    insecure: bool,
}

impl Config {
    /// Creates a configuration with default timeout and TLS verification on.
    pub fn new(gitlab_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            gitlab_url: gitlab_url.into(),
            access_token: access_token.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            insecure: false,
        }
    }

    /// Sets the per-request timeout in seconds.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Enables or disables TLS certificate verification bypass.
    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Loads the configuration from a JSON file, applies environment
    /// overrides and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or decoded, or if
    /// validation fails. Validation reports every problem at once.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::JsonError {
                path: path.display().to_string(),
                source: e,
            })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Replaces file values with non-empty `GITLAB_URL` / `ACCESS_TOKEN`.
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env(GITLAB_URL_ENV) {
            debug!(var = GITLAB_URL_ENV, "Overriding gitlabURL from environment");
            self.gitlab_url = url;
        }
        if let Some(token) = non_empty_env(ACCESS_TOKEN_ENV) {
            debug!(var = ACCESS_TOKEN_ENV, "Overriding accessToken from environment");
            self.access_token = token;
        }
    }

    /// Checks that all required fields are present and well formed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] listing every failed check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut messages = Vec::new();

        if self.gitlab_url.trim().is_empty() {
            messages.push("GitlabURL is required".to_string());
        } else if let Err(e) = Url::parse(&self.gitlab_url) {
            messages.push(format!("GitlabURL is not a valid URL: {e}"));
        }

        if self.access_token.trim().is_empty() {
            messages.push("AccessToken is required".to_string());
        }

        if self.request_timeout_secs == 0 {
            messages.push("requestTimeoutSecs must be greater than zero".to_string());
        }

        if messages.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError { messages })
        }
    }

    /// Returns the base API URL.
    pub fn gitlab_url(&self) -> &str {
        &self.gitlab_url
    }

    /// Returns the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns whether invalid TLS certificates are accepted.
    pub fn insecure(&self) -> bool {
        self.insecure
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}
