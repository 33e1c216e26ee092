//! GitHub token resolution and authentication.
//!
//! This module provides token resolution with fallback chain:
//!
//! 1. Token given on the command line or in `GITHUB_TOKEN`
//! 2. `github_token` from the config file
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (returns `None`)

use std::fmt;

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Where a resolved token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` flag or `GITHUB_TOKEN` environment variable.
    Explicit,
    /// `github_token` in the config file.
    ConfigFile,
    /// `gh auth token`.
    GhCli,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "command line",
            Self::ConfigFile => "config file",
            Self::GhCli => "gh CLI",
        })
    }
}

/// A token together with its source.
///
/// The `Debug` output never includes the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// The token value.
    pub token: String,
    /// Where it was found.
    pub source: TokenSource,
}

impl fmt::Debug for ResolvedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedToken")
            .field("token", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolves the GitHub token for a run.
///
/// Tries the following sources in order, ignoring blank values:
///
/// 1. `explicit` (from `--token` or `GITHUB_TOKEN`)
/// 2. `config_token` (from the config file)
/// 3. `gh auth token` command
///
/// # Returns
///
/// Returns `Some(token)` if a token is available, `None` otherwise. A
/// failing `gh` command counts as no token.
///
/// # Examples
///
/// ```no_run
/// use orglangs_config::auth::{TokenSource, resolve_token};
///
/// # async fn example() {
/// let token = resolve_token(None, Some("ghp_from_config")).await;
/// assert_eq!(token.map(|t| t.source), Some(TokenSource::ConfigFile));
/// # }
/// ```
pub async fn resolve_token(
    explicit: Option<&str>,
    config_token: Option<&str>,
) -> Option<ResolvedToken> {
    let candidates = [
        (explicit, TokenSource::Explicit),
        (config_token, TokenSource::ConfigFile),
    ];
    for (token, source) in candidates {
        if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
            return Some(ResolvedToken {
                token: token.to_string(),
                source,
            });
        }
    }

    match get_gh_token().await {
        Ok(token) => token.map(|token| ResolvedToken {
            token,
            source: TokenSource::GhCli,
        }),
        Err(err) => {
            debug!(error = %err, "gh CLI did not provide a token");
            None
        }
    }
}

/// Gets a GitHub token from the `gh` CLI.
///
/// Runs `gh auth token` and returns the token if successful.
///
/// # Returns
///
/// - `Ok(Some(token))` if the command succeeds and returns a token
/// - `Ok(None)` if the `gh` command is not found or not logged in
/// - `Err(...)` if the command exists but fails
///
/// # Errors
///
/// Returns an error if the `gh` command cannot be spawned or exits with an
/// unexpected failure.
pub async fn get_gh_token() -> Result<Option<String>> {
    use tokio::process::Command;

    let output = match Command::new("gh").args(["auth", "token"]).output().await {
        Ok(output) => output,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // gh not installed, not an error
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfigError::GhAuthFailed(e));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        if stderr.contains("not logged in") || stderr.contains("no oauth token") {
            return Ok(None);
        }
        return Err(ConfigError::GhAuthError {
            code: output.status.code(),
            stderr,
        });
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token))
}
