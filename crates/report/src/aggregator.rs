//! The two passes over an organization's repositories.
//!
//! The CSV header needs every language up front, but rows are streamed, so
//! the repositories are walked twice in the same batches:
//!
//! 1. [`discover_vocabulary`] fetches each breakdown and collects language
//!    names, then freezes them into the column set.
//! 2. [`write_rows`] fetches each breakdown again and writes one row per
//!    repository against the frozen columns, flushing after every batch.
//!
//! Breakdowns are not kept between passes, so at most one is held at a
//! time. A failed fetch only costs that repository: in the first pass its
//! languages may be missing from the columns, in the second pass it gets
//! no row.

use std::io::Write;

use orglangs_github::{Error as GithubError, Pacer, RunContext, Transport, fetch_languages};
use orglangs_protocol::{FrozenVocabulary, LanguageVocabulary, ReportRow, RepositorySummary};
use tracing::{info, instrument, warn};

use crate::error::{ReportError, Result};
use crate::writer::ReportWriter;

/// Outcome of the first pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// The report's language columns.
    pub vocabulary: FrozenVocabulary,
    /// Repositories whose languages could not be fetched.
    pub skipped: Vec<String>,
}

/// Outcome of the second pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowsOutcome {
    /// Rows written.
    pub written: usize,
    /// Repositories left out because their languages could not be fetched.
    pub skipped: Vec<String>,
    /// Whether the pass stopped early on cancellation.
    pub cancelled: bool,
}

fn batch_count(total: usize, batch_size: usize) -> usize {
    total.div_ceil(batch_size)
}

/// Collects the languages of every repository into a frozen vocabulary.
///
/// # Errors
///
/// Returns [`ReportError::Cancelled`] if the run is cancelled. Fetch
/// failures are logged and skipped.
#[instrument(skip_all, fields(repositories = repositories.len(), batch_size = batch_size))]
pub async fn discover_vocabulary<T: Transport, P: Pacer>(
    ctx: &RunContext<T, P>,
    repositories: &[RepositorySummary],
    batch_size: usize,
) -> Result<Discovery> {
    let batch_size = batch_size.max(1);
    let batches = batch_count(repositories.len(), batch_size);
    let mut vocabulary = LanguageVocabulary::new();
    let mut skipped = Vec::new();

    info!("Pass 1: discovering languages");
    for (index, batch) in repositories.chunks(batch_size).enumerate() {
        info!(batch = index + 1, of = batches, "processing batch");
        for repository in batch {
            match fetch_languages(ctx, repository).await {
                Ok(languages) => {
                    let added = vocabulary.observe(&languages);
                    if added > 0 {
                        info!(repository = %repository.name, added, "discovered new languages");
                    }
                }
                Err(GithubError::Cancelled) => return Err(ReportError::Cancelled),
                Err(err) => {
                    warn!(repository = %repository.name, error = %err, "failed to fetch languages, skipping");
                    skipped.push(repository.name.clone());
                }
            }
        }
    }

    let vocabulary = vocabulary.freeze();
    info!(languages = vocabulary.len(), "found unique languages");
    Ok(Discovery {
        vocabulary,
        skipped,
    })
}

/// Writes one row per repository whose languages can be fetched.
///
/// Rows are written as soon as they are computed and the writer is flushed
/// after every batch. On cancellation the rows written so far are flushed
/// and the pass returns with [`RowsOutcome::cancelled`] set.
///
/// # Errors
///
/// Returns an error if writing or flushing the output fails.
#[instrument(skip_all, fields(repositories = repositories.len(), batch_size = batch_size))]
pub async fn write_rows<T: Transport, P: Pacer, W: Write>(
    ctx: &RunContext<T, P>,
    repositories: &[RepositorySummary],
    vocabulary: &FrozenVocabulary,
    batch_size: usize,
    writer: &mut ReportWriter<W>,
) -> Result<RowsOutcome> {
    let batch_size = batch_size.max(1);
    let batches = batch_count(repositories.len(), batch_size);
    let mut outcome = RowsOutcome::default();

    info!("Pass 2: computing language percentages");
    'batches: for (index, batch) in repositories.chunks(batch_size).enumerate() {
        info!(batch = index + 1, of = batches, "processing batch");
        for repository in batch {
            match fetch_languages(ctx, repository).await {
                Ok(languages) => {
                    writer.write_row(&ReportRow::compute(repository, &languages, vocabulary))?;
                    outcome.written += 1;
                }
                Err(GithubError::Cancelled) => {
                    outcome.cancelled = true;
                    break 'batches;
                }
                Err(err) => {
                    warn!(repository = %repository.name, error = %err, "failed to fetch languages, leaving out of report");
                    outcome.skipped.push(repository.name.clone());
                }
            }
        }
        writer.flush()?;
    }

    if outcome.cancelled {
        writer.flush()?;
        warn!(written = outcome.written, "cancelled, report holds the rows written so far");
    }
    Ok(outcome)
}
