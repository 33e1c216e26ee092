//! Error types for GitHub API operations.
//!
//! This module defines the error types that can occur while listing an
//! organization's repositories and fetching their language breakdowns.

use chrono::{DateTime, Utc};

/// Text the OS uses for `ENOMEM`, as it surfaces in transport errors.
const MEMORY_EXHAUSTION_MESSAGE: &str = "Cannot allocate memory";

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error occurred while calling the GitHub API.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// The organization does not exist or is not visible with this token.
    #[error("organization '{org}' not found")]
    OrganizationNotFound {
        /// The organization that was requested.
        org: String,
    },

    /// The requested resource returned 404.
    #[error("resource not found: {url}")]
    NotFound {
        /// The URL that was requested.
        url: String,
    },

    /// Rate limit exceeded.
    ///
    /// GitHub API has rate limits: 60 requests/hour for unauthenticated
    /// requests, 5,000 requests/hour for authenticated requests.
    #[error("rate limit exceeded{}", format_reset_time(*.reset_at))]
    RateLimited {
        /// When the quota resets, if the response said so.
        reset_at: Option<DateTime<Utc>>,
    },

    /// The API answered with a status that is neither success nor handled.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The response body was not the JSON we expected.
    #[error("malformed response from {url}: {source}")]
    Decode {
        /// The URL that was requested.
        url: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A request could not be sent or completed.
    #[error("transport error: {message}")]
    Transport {
        /// A description of the failure.
        message: String,
    },

    /// The run was cancelled before the operation finished.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if the error reports that the host ran out of memory.
    ///
    /// The whole source chain is inspected, since the OS error is usually
    /// wrapped by several HTTP layers.
    #[must_use]
    pub fn is_resource_exhaustion(&self) -> bool {
        let mut current: Option<&(dyn std::error::Error + 'static)> = Some(self);
        while let Some(err) = current {
            if err.to_string().contains(MEMORY_EXHAUSTION_MESSAGE) {
                return true;
            }
            if let Some(io) = err.downcast_ref::<std::io::Error>()
                && io.kind() == std::io::ErrorKind::OutOfMemory
            {
                return true;
            }
            current = err.source();
        }
        false
    }
}

/// Formats the reset time for the rate limit error message.
fn format_reset_time(reset_at: Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(", resets at {}", at.to_rfc3339()),
        None => String::new(),
    }
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
