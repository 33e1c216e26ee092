//! Language composition reports for GitHub organizations.
//!
//! This crate turns an organization's repositories into a CSV report with
//! one row per repository and one percentage column per language used
//! anywhere in the organization.
//!
//! # Overview
//!
//! - [`generate_report`]: Listing, both aggregation passes, and output in one call
//! - [`aggregator`]: The vocabulary discovery pass and the row pass
//! - [`ReportWriter`]: CSV output with a fixed header, flushed per batch
//! - [`ReportSummary`]: Counts and skipped repositories of a finished run
//! - [`ReportError`]: Error types for report generation
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use orglangs_github::{DEFAULT_API_URL, GitHubClient, RetryPolicy, RunContext};
//! use orglangs_report::generate_report;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GitHubClient::new(None, DEFAULT_API_URL)?;
//! let ctx = RunContext::new(client, RetryPolicy::default());
//!
//! let summary = generate_report(&ctx, "acme", Path::new("acme.csv"), 10).await?;
//! println!("{} rows, {} languages", summary.rows_written, summary.languages);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod error;
pub mod generate;
pub mod writer;

pub use aggregator::{Discovery, RowsOutcome, discover_vocabulary, write_rows};
pub use error::{ReportError, Result};
pub use generate::{ReportSummary, generate_report};
pub use writer::ReportWriter;
