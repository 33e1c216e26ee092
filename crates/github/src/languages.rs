//! Fetching a repository's language breakdown.

use orglangs_protocol::{LanguageBytes, RepositorySummary};
use tracing::{debug, instrument};

use crate::context::{Pacer, RunContext};
use crate::error::Result;
use crate::retry::Phase;
use crate::transport::Transport;

/// Fetches the bytes of code per language for `repository`.
///
/// The request goes to the repository's `languages_url` with no parameters.
/// After a successful fetch the run waits for the configured fetch delay.
///
/// # Errors
///
/// Returns the error that made the retry policy skip this repository, or
/// [`Error::Cancelled`](crate::Error::Cancelled) if the run was cancelled.
#[instrument(skip(ctx, repository), fields(repository = %repository.name))]
pub async fn fetch_languages<T: Transport, P: Pacer>(
    ctx: &RunContext<T, P>,
    repository: &RepositorySummary,
) -> Result<LanguageBytes> {
    let url = repository.languages_url.as_str();
    let response = ctx.get(Phase::LanguageFetch, url, &[]).await?;
    let languages: LanguageBytes = response.json(url)?;
    debug!(count = languages.len(), "fetched languages");

    ctx.pause(ctx.policy().fetch_delay).await;
    Ok(languages)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::Error;
    use crate::fake::{FakeTransport, RecordingPacer};
    use crate::rate_limit::RateLimitStatus;
    use crate::retry::RetryPolicy;
    use crate::transport::Response;

    const URL: &str = "https://api.github.com/repos/acme/a/languages";

    fn context(transport: FakeTransport) -> RunContext<FakeTransport, RecordingPacer> {
        RunContext::with_pacer(
            transport,
            RetryPolicy::default(),
            RecordingPacer::starting_at(1_000),
        )
    }

    fn repository() -> RepositorySummary {
        RepositorySummary::new("a", URL)
    }

    #[tokio::test]
    async fn decodes_breakdown_in_platform_order() {
        let transport = FakeTransport::new();
        transport.push_json(URL, r#"{"Go": 800, "Shell": 200}"#);
        let ctx = context(transport);

        let languages = fetch_languages(&ctx, &repository()).await.unwrap();

        assert_eq!(languages.languages().collect::<Vec<_>>(), ["Go", "Shell"]);
        assert_eq!(languages.get("Go"), Some(800));
        assert_eq!(ctx.pacer().sleeps(), [Duration::from_millis(500)]);
    }

    #[tokio::test]
    async fn empty_breakdown_is_valid() {
        let transport = FakeTransport::new();
        transport.push_json(URL, "{}");
        let ctx = context(transport);

        let languages = fetch_languages(&ctx, &repository()).await.unwrap();
        assert!(languages.is_empty());
    }

    #[tokio::test]
    async fn not_found_is_returned_without_delay() {
        let transport = FakeTransport::new();
        transport.push_response(URL, Response::new(404, "{}"));
        let ctx = context(transport);

        let err = fetch_languages(&ctx, &repository()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(ctx.pacer().sleeps().is_empty());
    }

    #[tokio::test]
    async fn rate_limited_fetch_waits_then_succeeds() {
        let transport = FakeTransport::new();
        transport.push_response(
            URL,
            Response::new(403, "{}").with_rate_limit(RateLimitStatus::from_header_values(
                Some("0"),
                Some("1003"),
            )),
        );
        transport.push_json(URL, r#"{"Rust": 10}"#);
        let ctx = context(transport);

        let languages = fetch_languages(&ctx, &repository()).await.unwrap();

        assert_eq!(languages.get("Rust"), Some(10));
        assert_eq!(
            ctx.pacer().sleeps(),
            [Duration::from_secs(10), Duration::from_millis(500)]
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let transport = FakeTransport::new();
        transport.push_json(URL, r#"["Go"]"#);
        let ctx = context(transport);

        let err = fetch_languages(&ctx, &repository()).await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
