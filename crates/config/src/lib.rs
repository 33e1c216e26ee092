//! Configuration management for orglangs.
//!
//! This crate handles loading and validating configuration from the config
//! file, resolving the GitHub token, and merging both with the command line
//! into the options of a single report run.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`pacing`]: Delays between successful requests
//! - [`options`]: Per-run report options (organization, output path, batch size)
//! - [`auth`]: GitHub token resolution
//! - [`persistence`]: Config file lookup and reading
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Settings are taken from the following sources (highest to lowest):
//!
//! 1. Command-line flags and `GITHUB_TOKEN`
//! 2. Local config (`./orglangs.json5` or `./orglangs.json`)
//! 3. User config (`~/.config/orglangs/config.json5` or `~/.config/orglangs/config.json`)
//! 4. Built-in defaults
//!
//! ```json5
//! {
//!   github_token: "ghp_xxx",
//!   batch_size: 10,
//!   api_url: "https://api.github.com",
//!   pacing: { page_delay_ms: 1000, fetch_delay_ms: 500 },
//! }
//! ```
//!
//! # Token Resolution
//!
//! GitHub tokens are resolved in the following order:
//!
//! 1. `--token` flag or `GITHUB_TOKEN`
//! 2. `github_token` from config
//! 3. `gh auth token` command (GitHub CLI)
//! 4. Unauthenticated (rate-limited, public repositories only)
//!
//! # Examples
//!
//! ```no_run
//! use orglangs_config::{Config, ReportOptions, auth::resolve_token};
//!
//! # async fn example() -> orglangs_config::Result<()> {
//! let config = Config::load()?;
//! let options = ReportOptions::resolve("acme", None, None, &config, chrono::Local::now())?;
//! let token = resolve_token(None, config.github_token.as_deref()).await;
//!
//! println!("Writing {} ({} per batch)", options.output.display(), options.batch_size);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod options;
pub mod pacing;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use auth::{ResolvedToken, TokenSource};
pub use config::{Config, DEFAULT_API_URL, DEFAULT_BATCH_SIZE};
pub use error::{ConfigError, Result};
pub use options::{ReportOptions, default_output_path, validate_organization};
pub use pacing::PacingConfig;
