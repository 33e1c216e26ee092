//! orglangs - language composition reports for GitHub organizations.
//!
//! This is the main binary: it merges command-line arguments with the
//! config file, sets up the GitHub client, and writes the CSV report.

mod cli;
mod shutdown;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use orglangs_config::auth::resolve_token;
use orglangs_config::config::validate_api_url;
use orglangs_config::{Config, ReportOptions};
use orglangs_github::{CancellationFlag, GitHubClient, RetryPolicy, RunContext};
use orglangs_report::{ReportError, generate_report};
use secrecy::SecretString;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str =
    "orglangs=info,orglangs_config=info,orglangs_github=info,orglangs_report=info";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };

    let options = ReportOptions::resolve(
        &cli.organization,
        cli.output.clone(),
        cli.batch_size,
        &config,
        chrono::Local::now(),
    )?;
    let api_url = cli.api_url.as_deref().unwrap_or(&config.api_url);
    validate_api_url(api_url)?;

    let token = resolve_token(cli.token.as_deref(), config.github_token.as_deref()).await;
    match &token {
        Some(resolved) => info!(source = %resolved.source, "using authenticated GitHub access"),
        None => warn!("no GitHub token found, using unauthenticated access (60 requests/hour, public repositories only)"),
    }
    let client = GitHubClient::new(
        token.map(|resolved| SecretString::from(resolved.token)),
        api_url,
    )?;

    let cancellation = CancellationFlag::new();
    shutdown::install_handler(cancellation.clone());

    let policy = RetryPolicy::default()
        .with_pacing(config.pacing.page_delay(), config.pacing.fetch_delay());
    let ctx = RunContext::new(client, policy)
        .with_api_url(api_url)
        .with_cancellation(cancellation);

    info!(
        organization = %options.organization,
        output = %options.output.display(),
        batch_size = options.batch_size,
        "generating language report"
    );
    let summary = match generate_report(
        &ctx,
        &options.organization,
        &options.output,
        options.batch_size,
    )
    .await
    {
        Ok(summary) => summary,
        Err(ReportError::Cancelled) => {
            warn!("cancelled before the report was written");
            return Ok(ExitCode::from(shutdown::INTERRUPTED_EXIT_CODE));
        }
        Err(err) => return Err(err).context("failed to generate report"),
    };

    if !summary.discovery_skipped.is_empty() {
        warn!(
            repositories = ?summary.discovery_skipped,
            "languages of some repositories may be missing from the columns"
        );
    }
    if !summary.rows_skipped.is_empty() {
        warn!(repositories = ?summary.rows_skipped, "some repositories have no row");
    }
    info!(
        path = %summary.output.display(),
        repositories = summary.repositories,
        rows = summary.rows_written,
        languages = summary.languages,
        "Report saved"
    );

    if summary.cancelled {
        return Ok(ExitCode::from(shutdown::INTERRUPTED_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}
