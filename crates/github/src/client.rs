//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct, the production
//! [`Transport`] backed by octocrab, supporting both authenticated and
//! unauthenticated access.

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::rate_limit::{REMAINING_HEADER, RESET_HEADER, RateLimitStatus};
use crate::transport::{REQUEST_TIMEOUT, Response, Transport, with_query};

/// Default base URL of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API client with optional authentication.
///
/// The client supports both authenticated and unauthenticated access.
/// Authenticated clients have higher rate limits (5,000 req/hour vs 60 req/hour)
/// and can see the organization's private repositories.
///
/// # Security
///
/// Tokens are stored using [`SecretString`] to prevent accidental logging
/// or exposure in debug output.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use orglangs_github::{DEFAULT_API_URL, GitHubClient};
///
/// # fn example() -> orglangs_github::Result<()> {
/// let token = SecretString::from("ghp_your_token".to_string());
/// let client = GitHubClient::new(Some(token), DEFAULT_API_URL)?;
/// assert!(client.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubClient {
    /// The underlying octocrab client.
    inner: Octocrab,
    /// Whether this client is authenticated.
    authenticated: bool,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    ///
    /// # Arguments
    ///
    /// * `token` - Optional GitHub personal access token. If `None`, the
    ///   client is unauthenticated and only sees public repositories.
    /// * `api_url` - Base URL of the REST API, e.g. [`DEFAULT_API_URL`] or a
    ///   GitHub Enterprise `https://host/api/v3`.
    ///
    /// Every request uses a 30 second connect and read timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the octocrab client
    /// fails to initialize.
    #[instrument(skip(token), fields(authenticated = token.is_some()))]
    pub fn new(token: Option<SecretString>, api_url: &str) -> Result<Self> {
        let builder = Octocrab::builder()
            .base_uri(api_url)
            .map_err(Error::Api)?
            .set_connect_timeout(Some(REQUEST_TIMEOUT))
            .set_read_timeout(Some(REQUEST_TIMEOUT));

        let (inner, authenticated) = match token {
            Some(token) => {
                debug!("creating authenticated GitHub client");
                let client = builder
                    .personal_token(token.expose_secret())
                    .build()
                    .map_err(Error::Api)?;
                (client, true)
            }
            None => {
                debug!("creating unauthenticated GitHub client");
                let client = builder.build().map_err(Error::Api)?;
                (client, false)
            }
        };

        Ok(Self {
            inner,
            authenticated,
        })
    }

    /// Returns whether this client is authenticated.
    ///
    /// This returns the authentication state at client creation time; it
    /// does not verify the token is still valid.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl Transport for GitHubClient {
    #[instrument(skip(self, query), fields(url = %url))]
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        let full_url = with_query(url, query);
        debug!("sending request");

        let response = self
            .inner
            ._get(full_url.as_str())
            .await
            .map_err(Error::Api)?;

        let status = response.status().as_u16();
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
        };
        let rate_limit = RateLimitStatus::from_header_values(
            header(REMAINING_HEADER).as_deref(),
            header(RESET_HEADER).as_deref(),
        );

        let body = self
            .inner
            .body_to_string(response)
            .await
            .map_err(Error::Api)?;
        debug!(status, remaining = ?rate_limit.remaining, "received response");

        Ok(Response {
            status,
            rate_limit,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_unauthenticated_client() {
        let client = GitHubClient::new(None, DEFAULT_API_URL).unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn new_authenticated_client() {
        // Creating the client does not contact the API, so a fake token is fine
        let token = SecretString::from("fake_token_for_testing".to_string());
        let client = GitHubClient::new(Some(token), DEFAULT_API_URL).unwrap();
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn new_with_enterprise_url() {
        let client = GitHubClient::new(None, "https://github.example.com/api/v3").unwrap();
        assert!(!client.is_authenticated());
    }
}
