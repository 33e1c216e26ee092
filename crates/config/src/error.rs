//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, and validation of report options.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// The organization name cannot be used in a request path.
    #[error("invalid organization name {name:?}: {reason}")]
    InvalidOrganization {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The batch size is zero.
    #[error("invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// A pacing delay is out of bounds.
    #[error("invalid pacing: {reason}")]
    InvalidPacing {
        /// The reason the delay is invalid.
        reason: String,
    },

    /// The API base URL is not an HTTP(S) URL.
    #[error("invalid API URL {0:?}: must start with http:// or https://")]
    InvalidApiUrl(String),

    /// Failed to execute `gh auth token` command.
    #[error("failed to get GitHub token from gh CLI: {0}")]
    GhAuthFailed(#[source] std::io::Error),

    /// The `gh auth token` command returned an error.
    #[error("gh auth token failed with exit code {code:?}: {stderr}")]
    GhAuthError {
        /// The exit code, if available.
        code: Option<i32>,
        /// The stderr output.
        stderr: String,
    },
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
