//! End-to-end report generation.

use std::path::{Path, PathBuf};

use orglangs_github::{Error as GithubError, Pacer, RunContext, Transport, list_org_repositories};
use tracing::{info, instrument};

use crate::aggregator::{discover_vocabulary, write_rows};
use crate::error::{ReportError, Result};
use crate::writer::ReportWriter;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Where the report was written.
    pub output: PathBuf,
    /// Repositories listed for the organization.
    pub repositories: usize,
    /// Language columns in the report.
    pub languages: usize,
    /// Rows written.
    pub rows_written: usize,
    /// Repositories whose languages could not be discovered.
    pub discovery_skipped: Vec<String>,
    /// Repositories left out of the report.
    pub rows_skipped: Vec<String>,
    /// Whether the run was cancelled while writing rows.
    pub cancelled: bool,
}

impl ReportSummary {
    /// Returns `true` if every listed repository has a row.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.rows_written == self.repositories
    }
}

/// Lists `organization`, runs both passes, and writes the CSV to `output`.
///
/// The output file is only created once the language columns are known, so
/// a run that fails while listing leaves nothing behind.
///
/// # Errors
///
/// Returns an error if the organization cannot be listed, the run is
/// cancelled before the file is created, or the file cannot be written.
#[instrument(skip(ctx, output), fields(output = %output.display()))]
pub async fn generate_report<T: Transport, P: Pacer>(
    ctx: &RunContext<T, P>,
    organization: &str,
    output: &Path,
    batch_size: usize,
) -> Result<ReportSummary> {
    let repositories = list_org_repositories(ctx, organization)
        .await
        .map_err(|err| match err {
            GithubError::Cancelled => ReportError::Cancelled,
            other => ReportError::Github(other),
        })?;

    let discovery = discover_vocabulary(ctx, &repositories, batch_size).await?;
    if ctx.cancellation().is_cancelled() {
        return Err(ReportError::Cancelled);
    }

    let mut writer = ReportWriter::create(output, &discovery.vocabulary)?;
    let rows = write_rows(
        ctx,
        &repositories,
        &discovery.vocabulary,
        batch_size,
        &mut writer,
    )
    .await?;
    writer.flush()?;

    let summary = ReportSummary {
        output: output.to_path_buf(),
        repositories: repositories.len(),
        languages: discovery.vocabulary.len(),
        rows_written: rows.written,
        discovery_skipped: discovery.skipped,
        rows_skipped: rows.skipped,
        cancelled: rows.cancelled,
    };
    info!(
        rows = summary.rows_written,
        repositories = summary.repositories,
        "report written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use orglangs_github::fake::{FakeTransport, RecordingPacer};
    use orglangs_github::{Response, RetryPolicy};
    use tempfile::TempDir;

    use super::*;

    const LIST_URL: &str = "https://api.github.com/orgs/acme/repos";

    fn page_query(page: u32) -> [(&'static str, String); 2] {
        [("page", page.to_string()), ("per_page", "30".to_string())]
    }

    fn record(name: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "html_url": format!("https://github.com/acme/{name}"),
            "description": null,
            "created_at": "2021-06-01T10:00:00Z",
            "updated_at": "2024-06-01T10:00:00Z",
            "stargazers_count": 1,
            "forks_count": 0,
            "private": false,
            "languages_url": format!("https://api.github.com/repos/acme/{name}/languages"),
        })
    }

    fn list(transport: &FakeTransport, names: &[&str]) {
        let records: Vec<_> = names.iter().map(|name| record(name)).collect();
        transport.push_response_for(
            LIST_URL,
            &page_query(1),
            Response::new(200, serde_json::Value::from(records).to_string()),
        );
        transport.push_response_for(LIST_URL, &page_query(2), Response::new(200, "[]"));
    }

    fn context(transport: FakeTransport) -> RunContext<FakeTransport, RecordingPacer> {
        RunContext::with_pacer(
            transport,
            RetryPolicy::default(),
            RecordingPacer::starting_at(0),
        )
    }

    #[tokio::test]
    async fn acme_report() {
        let transport = FakeTransport::new();
        list(&transport, &["a", "b"]);
        transport.push_json(
            "https://api.github.com/repos/acme/a/languages",
            r#"{"Go": 800, "HTML": 200}"#,
        );
        transport.push_json(
            "https://api.github.com/repos/acme/b/languages",
            r#"{"Go": 500}"#,
        );
        let ctx = context(transport);
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("acme.csv");

        let summary = generate_report(&ctx, "acme", &output, 10).await.unwrap();

        assert!(summary.is_complete());
        assert_eq!(summary.languages, 2);
        insta::assert_snapshot!(std::fs::read_to_string(&output).unwrap(), @r"
        Repository,URL,Description,Primary Language,Created At,Updated At,Stars,Forks,Private,Go (%),HTML (%)
        a,https://github.com/acme/a,,Go,2021-06-01T10:00:00Z,2024-06-01T10:00:00Z,1,0,No,80.00,20.00
        b,https://github.com/acme/b,,Go,2021-06-01T10:00:00Z,2024-06-01T10:00:00Z,1,0,No,100.00,0.00
        ");

        // one page delay, then two fetch delays per pass
        assert_eq!(
            ctx.pacer().sleeps(),
            [
                Duration::from_secs(1),
                Duration::from_millis(500),
                Duration::from_millis(500),
                Duration::from_millis(500),
                Duration::from_millis(500),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_organization_writes_nothing() {
        let transport = FakeTransport::new();
        transport.push_response_for(LIST_URL, &page_query(1), Response::new(404, "{}"));
        let ctx = context(transport);
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("acme.csv");

        let err = generate_report(&ctx, "acme", &output, 10).await.unwrap_err();

        assert!(matches!(
            err,
            ReportError::Github(GithubError::OrganizationNotFound { .. })
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn empty_organization_writes_header_only() {
        let transport = FakeTransport::new();
        transport.push_response_for(LIST_URL, &page_query(1), Response::new(200, "[]"));
        let ctx = context(transport);
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("empty.csv");

        let summary = generate_report(&ctx, "acme", &output, 10).await.unwrap();

        assert_eq!(summary.repositories, 0);
        assert!(summary.is_complete());
        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[tokio::test]
    async fn cancelled_before_writing_creates_no_file() {
        let transport = FakeTransport::new();
        list(&transport, &["a"]);
        let ctx = context(transport);
        ctx.cancellation().cancel();
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("acme.csv");

        let err = generate_report(&ctx, "acme", &output, 10).await.unwrap_err();

        assert!(matches!(err, ReportError::Cancelled));
        assert!(!output.exists());
    }
}
