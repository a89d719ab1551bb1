//! Runner error types.

/// Errors that can occur while running a verification.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// GitLab client or request errors.
    #[error(transparent)]
    Gitlab(#[from] crate::gitlab::GitlabError),

    /// No branch name was given.
    #[error("branch name must not be empty")]
    EmptyBranch,
}
