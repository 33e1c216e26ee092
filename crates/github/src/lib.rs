//! GitHub API access for orglangs.
//!
//! This crate lists an organization's repositories and fetches each
//! repository's language breakdown, pacing requests and recovering from
//! rate limiting along the way.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`GitHubClient`]: The octocrab-backed [`Transport`], with optional authentication
//! - [`RunContext`]: Transport, [`RetryPolicy`], [`Pacer`] and [`CancellationFlag`] for one run
//! - [`list_org_repositories`]: Paginated listing of an organization's repositories
//! - [`fetch_languages`]: One repository's bytes of code per language
//! - [`RetryPolicy`]: The recovery decision for each failure, per [`Phase`]
//! - [`fake`]: Scripted transport and recording pacer for offline runs
//! - [`Error`]: Error types for GitHub API operations
//!
//! # Authentication
//!
//! The client supports both authenticated and unauthenticated access:
//!
//! - **Authenticated**: 5,000 requests/hour, private repositories visible
//! - **Unauthenticated**: 60 requests/hour, public repositories only
//!
//! Tokens are handled securely using [`secrecy::SecretString`] to prevent
//! accidental logging of sensitive credentials.
//!
//! # Rate limits
//!
//! Every response carries the remaining quota and its reset time. A `403`
//! with no quota left is waited out and the identical request is sent again;
//! an exhausted quota reported on a successful listing page is waited out
//! before the next page is requested.
//!
//! # Examples
//!
//! Listing an organization's repositories and their languages:
//!
//! ```no_run
//! use orglangs_github::{
//!     DEFAULT_API_URL, GitHubClient, RetryPolicy, RunContext, fetch_languages,
//!     list_org_repositories,
//! };
//!
//! # async fn example() -> orglangs_github::Result<()> {
//! let client = GitHubClient::new(None, DEFAULT_API_URL)?;
//! let ctx = RunContext::new(client, RetryPolicy::default());
//!
//! for repository in list_org_repositories(&ctx, "rust-lang").await? {
//!     let languages = fetch_languages(&ctx, &repository).await?;
//!     println!("{}: {:?}", repository.name, languages.primary_language());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod fake;
pub mod languages;
pub mod lister;
pub mod rate_limit;
pub mod retry;
pub mod transport;

pub use client::{DEFAULT_API_URL, GitHubClient};
pub use context::{CancellationFlag, Pacer, RunContext, TokioPacer};
pub use error::{Error, Result};
pub use languages::fetch_languages;
pub use lister::{PAGE_SIZE, list_org_repositories};
pub use rate_limit::RateLimitStatus;
pub use retry::{Phase, Recovery, RetryPolicy};
pub use transport::{Response, Transport};
