//! The HTTP boundary: a single GET operation and its raw response.
//!
//! Everything above this module talks to GitHub through [`Transport`], so the
//! retry policy, lister and aggregator can be exercised against the scripted
//! [`FakeTransport`](crate::fake::FakeTransport) as well as the real
//! [`GitHubClient`](crate::GitHubClient).

use std::future::Future;
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::rate_limit::RateLimitStatus;

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Characters left as-is in query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Issues GET requests against the GitHub API.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status, and `Err` only when no response was received
/// (connection failure, timeout). Status handling belongs to the caller.
pub trait Transport {
    /// Sends `GET url?query` and returns the raw response.
    fn get(&self, url: &str, query: &[(&str, String)])
    -> impl Future<Output = Result<Response>> + Send;
}

/// A response as seen by the retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Rate-limit headers.
    pub rate_limit: RateLimitStatus,
    /// Response body.
    pub body: String,
}

impl Response {
    /// Creates a response with no rate-limit headers.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            rate_limit: RateLimitStatus::default(),
            body: body.into(),
        }
    }

    /// Attaches rate-limit headers.
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitStatus) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Returns `true` for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns non-2xx statuses into errors.
    ///
    /// A 403 with an exhausted quota becomes [`Error::RateLimited`], a 404
    /// becomes [`Error::NotFound`], anything else [`Error::Status`].
    ///
    /// # Errors
    ///
    /// Returns an error for every non-2xx status.
    pub fn error_for_status(self, url: &str) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(match self.status {
            403 if self.rate_limit.is_exhausted() => Error::RateLimited {
                reset_at: self.rate_limit.reset_at(),
            },
            404 => Error::NotFound {
                url: url.to_string(),
            },
            status => Error::Status {
                status,
                url: url.to_string(),
            },
        })
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Appends percent-encoded query parameters to `url`.
///
/// # Examples
///
/// ```
/// use orglangs_github::transport::with_query;
///
/// let url = with_query("https://api.github.com/orgs/acme/repos", &[("page", "2".to_string())]);
/// assert_eq!(url, "https://api.github.com/orgs/acme/repos?page=2");
/// assert_eq!(with_query("https://x.test/a?b=1", &[("c", "d e".to_string())]), "https://x.test/a?b=1&c=d%20e");
/// ```
#[must_use]
pub fn with_query(url: &str, query: &[(&str, String)]) -> String {
    let mut full = url.to_string();
    let mut separator = if url.contains('?') { '&' } else { '?' };
    for (key, value) in query {
        full.push(separator);
        full.push_str(&utf8_percent_encode(key, QUERY_VALUE).to_string());
        full.push('=');
        full.push_str(&utf8_percent_encode(value, QUERY_VALUE).to_string());
        separator = '&';
    }
    full
}
