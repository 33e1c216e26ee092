//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Report the language composition of every repository in a GitHub organization.
///
/// Writes a CSV file with one row per repository and one percentage column
/// per language found anywhere in the organization.
#[derive(Debug, Parser)]
#[command(name = "orglangs", version, about)]
pub struct Cli {
    /// GitHub organization to report on.
    pub organization: String,

    /// GitHub token; falls back to the config file, then `gh auth token`.
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output CSV path [default: {org}_repo_languages_{timestamp}.csv].
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Repositories processed per batch [default: 10].
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Config file to use instead of the default locations.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the GitHub REST API, e.g. for GitHub Enterprise.
    #[arg(long)]
    pub api_url: Option<String>,
}
