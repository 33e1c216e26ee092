//! Error types for report generation.

use std::path::PathBuf;

/// Errors that can end a report run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Listing the organization failed.
    #[error(transparent)]
    Github(#[from] orglangs_github::Error),

    /// The output file could not be created.
    #[error("failed to create report at {path}: {source}")]
    CreateOutput {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing a record failed.
    #[error("failed to write report: {0}")]
    Csv(#[from] csv::Error),

    /// Flushing the output failed.
    #[error("failed to flush report: {0}")]
    Io(#[from] std::io::Error),

    /// A row does not match the header width.
    #[error("row for {repository} has {actual} fields, header has {expected}")]
    RowWidth {
        /// Repository the row describes.
        repository: String,
        /// Header width.
        expected: usize,
        /// Row width.
        actual: usize,
    },

    /// The run was cancelled before the output file was created.
    #[error("report cancelled before any row was written")]
    Cancelled,
}

/// A specialized Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
