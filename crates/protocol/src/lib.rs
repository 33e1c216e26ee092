//! Shared types for the orglangs report.
//!
//! This crate defines the data model used across all orglangs components:
//! repository summaries, per-repository language breakdowns, the
//! organization-wide language vocabulary, and report rows.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`repository`]: The `RepositorySummary` kept for each listed repository
//! - [`language`]: Ordered language byte counts and percentage rounding
//! - [`vocabulary`]: The growing and frozen sets of report languages
//! - [`row`]: Header construction and per-repository report rows
//!
//! # Examples
//!
//! Building the two-repository `acme` report by hand:
//!
//! ```
//! use orglangs_protocol::{LanguageBytes, LanguageVocabulary, ReportRow, RepositorySummary, header};
//!
//! let a = RepositorySummary::new("a", "https://api.github.com/repos/acme/a/languages");
//! let b = RepositorySummary::new("b", "https://api.github.com/repos/acme/b/languages");
//! let a_langs: LanguageBytes = [("Go", 800), ("HTML", 200)].into_iter().collect();
//! let b_langs: LanguageBytes = [("Go", 500)].into_iter().collect();
//!
//! // First pass: discover every language
//! let mut vocabulary = LanguageVocabulary::new();
//! vocabulary.observe(&a_langs);
//! vocabulary.observe(&b_langs);
//! let vocabulary = vocabulary.freeze();
//!
//! // Second pass: compute rows against the frozen columns
//! assert_eq!(header(&vocabulary).len(), 11);
//! let row = ReportRow::compute(&b, &b_langs, &vocabulary);
//! assert_eq!(row.percentages(), [100.0, 0.0]);
//! # let _ = a;
//! ```

pub mod language;
pub mod repository;
pub mod row;
pub mod vocabulary;

// Re-export primary types at crate root for convenience
pub use language::LanguageBytes;
pub use repository::{RepositorySummary, format_timestamp};
pub use row::{LEADING_COLUMNS, NO_PRIMARY_LANGUAGE, ReportRow, header, row_width};
pub use vocabulary::{FrozenVocabulary, LanguageVocabulary};
