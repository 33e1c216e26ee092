//! Listing an organization's repositories.
//!
//! The organization's repositories are fetched page by page from
//! `GET /orgs/{org}/repos` until an empty page comes back. Each record is
//! projected to a [`RepositorySummary`] right away, so only the fields the
//! report needs are kept in memory.

use chrono::{DateTime, Utc};
use orglangs_protocol::RepositorySummary;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::context::{Pacer, RunContext};
use crate::error::{Error, Result};
use crate::retry::Phase;
use crate::transport::Transport;

/// Number of repositories requested per page.
pub const PAGE_SIZE: u32 = 30;

/// Characters left as-is in the organization path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// A repository record as returned by the API, reduced to what we read.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepository {
    /// Repository name.
    pub name: String,
    /// Web URL.
    pub html_url: String,
    /// Description, `null` when unset.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Stargazer count.
    pub stargazers_count: u32,
    /// Fork count.
    pub forks_count: u32,
    /// Visibility.
    pub private: bool,
    /// URL of the language breakdown.
    pub languages_url: String,
}

impl From<RawRepository> for RepositorySummary {
    fn from(raw: RawRepository) -> Self {
        Self {
            name: raw.name,
            html_url: raw.html_url,
            description: raw.description.unwrap_or_default(),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            stargazers_count: raw.stargazers_count,
            forks_count: raw.forks_count,
            private: raw.private,
            languages_url: raw.languages_url,
        }
    }
}

/// Builds the repository listing URL for `org`.
///
/// # Examples
///
/// ```
/// use orglangs_github::lister::org_repos_url;
///
/// assert_eq!(org_repos_url("https://api.github.com", "acme"), "https://api.github.com/orgs/acme/repos");
/// assert_eq!(org_repos_url("https://api.github.com", "a b"), "https://api.github.com/orgs/a%20b/repos");
/// ```
#[must_use]
pub fn org_repos_url(api_url: &str, org: &str) -> String {
    let org = utf8_percent_encode(org, PATH_SEGMENT);
    format!("{}/orgs/{org}/repos", api_url.trim_end_matches('/'))
}

/// Lists every repository of `org`, in API order.
///
/// Between pages the run waits for the configured page delay, or until the
/// rate limit resets when the last response reported no quota left.
///
/// # Errors
///
/// Returns [`Error::OrganizationNotFound`] if the organization does not
/// exist, [`Error::Cancelled`] if the run was cancelled, or the error that
/// made the retry policy give up. No partial list is returned.
#[instrument(skip(ctx), fields(api_url = %ctx.api_url()))]
pub async fn list_org_repositories<T: Transport, P: Pacer>(
    ctx: &RunContext<T, P>,
    org: &str,
) -> Result<Vec<RepositorySummary>> {
    let url = org_repos_url(ctx.api_url(), org);
    let mut repositories = Vec::new();
    let mut page: u32 = 1;

    info!(org, "fetching repositories for organization");
    loop {
        info!(page, "fetching page of repositories");
        let query = [("page", page.to_string()), ("per_page", PAGE_SIZE.to_string())];
        let response = ctx
            .get(Phase::Listing, &url, &query)
            .await
            .map_err(|err| match err {
                Error::NotFound { .. } => Error::OrganizationNotFound {
                    org: org.to_string(),
                },
                other => other,
            })?;

        let records: Vec<RawRepository> = response.json(&url)?;
        if records.is_empty() {
            break;
        }

        info!(count = records.len(), "fetched repositories");
        repositories.extend(records.into_iter().map(RepositorySummary::from));
        page += 1;

        let delay = ctx
            .policy()
            .delay_between_pages(&response.rate_limit, ctx.pacer().now());
        if response.rate_limit.is_exhausted() {
            info!(secs = delay.as_secs(), "rate limit reached, sleeping until reset");
        }
        ctx.pause(delay).await;
    }

    info!(total = repositories.len(), "found repositories");
    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::fake::{FakeTransport, RecordingPacer};
    use crate::rate_limit::RateLimitStatus;
    use crate::retry::RetryPolicy;
    use crate::transport::Response;

    const LIST_URL: &str = "https://api.github.com/orgs/acme/repos";

    fn page_query(page: u32) -> [(&'static str, String); 2] {
        [("page", page.to_string()), ("per_page", "30".to_string())]
    }

    fn record(name: &str, description: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "id": 1,
            "name": name,
            "full_name": format!("acme/{name}"),
            "html_url": format!("https://github.com/acme/{name}"),
            "description": description,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2024-02-03T04:05:06Z",
            "stargazers_count": 7,
            "forks_count": 2,
            "private": false,
            "languages_url": format!("https://api.github.com/repos/acme/{name}/languages"),
            "owner": { "login": "acme" },
        })
    }

    fn page(records: &[serde_json::Value]) -> Response {
        Response::new(200, serde_json::Value::from(records.to_vec()).to_string())
    }

    fn context(transport: FakeTransport) -> RunContext<FakeTransport, RecordingPacer> {
        RunContext::with_pacer(
            transport,
            RetryPolicy::default(),
            RecordingPacer::starting_at(1_000),
        )
    }

    #[tokio::test]
    async fn paginates_until_empty_page() {
        let transport = FakeTransport::new();
        transport.push_response_for(
            LIST_URL,
            &page_query(1),
            page(&[record("a", Some("first")), record("b", None)]),
        );
        transport.push_response_for(LIST_URL, &page_query(2), page(&[record("c", None)]));
        transport.push_response_for(LIST_URL, &page_query(3), page(&[]));
        let ctx = context(transport);

        let repos = list_org_repositories(&ctx, "acme").await.unwrap();

        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(repos[0].description, "first");
        assert_eq!(repos[1].description, "");
        assert_eq!(repos[0].stargazers_count, 7);
        assert_eq!(
            repos[2].languages_url,
            "https://api.github.com/repos/acme/c/languages"
        );
        assert_eq!(ctx.transport().requests().len(), 3);
        assert_eq!(
            ctx.pacer().sleeps(),
            [Duration::from_secs(1), Duration::from_secs(1)]
        );
    }

    #[tokio::test]
    async fn not_found_aborts_with_organization_error() {
        let transport = FakeTransport::new();
        transport.push_response_for(LIST_URL, &page_query(1), Response::new(404, "{}"));
        let ctx = context(transport);

        let err = list_org_repositories(&ctx, "acme").await.unwrap_err();
        assert!(matches!(err, Error::OrganizationNotFound { ref org } if org == "acme"));
        assert_eq!(ctx.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn failure_on_later_page_returns_no_data() {
        let transport = FakeTransport::new();
        transport.push_response_for(LIST_URL, &page_query(1), page(&[record("a", None)]));
        transport.push_response_for(LIST_URL, &page_query(2), Response::new(500, "oops"));
        let ctx = context(transport);

        let err = list_org_repositories(&ctx, "acme").await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn exhausted_quota_sleeps_until_reset_before_next_page() {
        let transport = FakeTransport::new();
        transport.push_response_for(
            LIST_URL,
            &page_query(1),
            page(&[record("a", None)]).with_rate_limit(RateLimitStatus::from_header_values(
                Some("0"),
                Some("1120"),
            )),
        );
        transport.push_response_for(LIST_URL, &page_query(2), page(&[]));
        let ctx = context(transport);

        list_org_repositories(&ctx, "acme").await.unwrap();
        assert_eq!(ctx.pacer().sleeps(), [Duration::from_secs(121)]);
    }

    #[tokio::test]
    async fn rate_limited_page_is_retried_after_reset() {
        let transport = FakeTransport::new();
        transport.push_response_for(
            LIST_URL,
            &page_query(1),
            Response::new(403, r#"{"message":"API rate limit exceeded"}"#).with_rate_limit(
                RateLimitStatus::from_header_values(Some("0"), Some("1500")),
            ),
        );
        transport.push_response_for(LIST_URL, &page_query(1), page(&[record("a", None)]));
        transport.push_response_for(LIST_URL, &page_query(2), page(&[]));
        let ctx = context(transport);

        let repos = list_org_repositories(&ctx, "acme").await.unwrap();

        assert_eq!(repos.len(), 1);
        assert_eq!(
            ctx.pacer().sleeps(),
            [Duration::from_secs(501), Duration::from_secs(1)]
        );
        let first_page = format!("{LIST_URL}?page=1&per_page=30");
        assert_eq!(ctx.transport().request_count(&first_page), 2);
    }

    #[tokio::test]
    async fn malformed_page_aborts() {
        let transport = FakeTransport::new();
        transport.push_response_for(LIST_URL, &page_query(1), Response::new(200, "{}"));
        let ctx = context(transport);

        let err = list_org_repositories(&ctx, "acme").await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn raw_repository_null_description_becomes_empty() {
        let raw: RawRepository = serde_json::from_value(record("x", None)).unwrap();
        let summary = RepositorySummary::from(raw);
        assert_eq!(summary.description, "");
        assert!(!summary.private);
    }

    #[test]
    fn org_repos_url_encodes_path_segment() {
        assert_eq!(
            org_repos_url("https://ghe.example.com/api/v3/", "my-org_1.x"),
            "https://ghe.example.com/api/v3/orgs/my-org_1.x/repos"
        );
        assert_eq!(
            org_repos_url("https://api.github.com", "a/b?c"),
            "https://api.github.com/orgs/a%2Fb%3Fc/repos"
        );
    }
}
