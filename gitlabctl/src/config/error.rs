//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the JSON content.
    #[error("failed to decode config '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// One or more fields are missing or invalid after environment overrides.
    #[error("config validation failed: validation errors: {}", .messages.join(", "))]
    ValidationError { messages: Vec<String> },
}
