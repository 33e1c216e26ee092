//! CSV output with a header fixed at creation.
//!
//! The header is written as soon as a [`ReportWriter`] is created, from a
//! [`FrozenVocabulary`], and every later row is checked against its width.
//! Whatever has been flushed is a valid report on its own: a header
//! followed by complete rows.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use orglangs_protocol::{FrozenVocabulary, ReportRow, header};
use tracing::debug;

use crate::error::{ReportError, Result};

/// Streams report rows to CSV.
///
/// # Examples
///
/// ```
/// use orglangs_protocol::{LanguageBytes, LanguageVocabulary, ReportRow, RepositorySummary};
/// use orglangs_report::ReportWriter;
///
/// # fn main() -> orglangs_report::Result<()> {
/// let vocabulary = ["Go"].into_iter().collect::<LanguageVocabulary>().freeze();
/// let mut writer = ReportWriter::from_writer(Vec::new(), &vocabulary)?;
///
/// let repo = RepositorySummary::new("a", "");
/// let languages: LanguageBytes = [("Go", 1)].into_iter().collect();
/// writer.write_row(&ReportRow::compute(&repo, &languages, &vocabulary))?;
///
/// let csv = String::from_utf8(writer.into_inner()?).unwrap();
/// assert!(csv.starts_with("Repository,URL,Description,Primary Language,"));
/// assert!(csv.contains(",No,100.00\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReportWriter<W: Write> {
    inner: csv::Writer<W>,
    width: usize,
    rows_written: usize,
}

impl ReportWriter<File> {
    /// Creates (or truncates) the file at `path` and writes the header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or the header cannot
    /// be written.
    pub fn create(path: impl AsRef<Path>, vocabulary: &FrozenVocabulary) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ReportError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "created report file");
        Self::from_writer(file, vocabulary)
    }
}

impl<W: Write> ReportWriter<W> {
    /// Wraps `writer` and writes the header for `vocabulary`.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be written.
    pub fn from_writer(writer: W, vocabulary: &FrozenVocabulary) -> Result<Self> {
        let header = header(vocabulary);
        let mut inner = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        inner.write_record(&header)?;

        Ok(Self {
            inner,
            width: header.len(),
            rows_written: 0,
        })
    }

    /// Appends one row.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::RowWidth`] if the row was computed against a
    /// different vocabulary, or an error if the record cannot be written.
    pub fn write_row(&mut self, row: &ReportRow<'_>) -> Result<()> {
        let fields = row.fields();
        if fields.len() != self.width {
            return Err(ReportError::RowWidth {
                repository: row.repository().name.clone(),
                expected: self.width,
                actual: fields.len(),
            });
        }
        self.inner.write_record(&fields)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flushes buffered rows to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails to flush.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Returns the number of fields per record.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows written so far, header excluded.
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|err| ReportError::Io(err.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use orglangs_protocol::{LanguageBytes, LanguageVocabulary, RepositorySummary};

    use super::*;

    fn vocabulary(languages: &[&str]) -> FrozenVocabulary {
        languages
            .iter()
            .copied()
            .collect::<LanguageVocabulary>()
            .freeze()
    }

    fn repo(name: &str, description: &str, private: bool) -> RepositorySummary {
        let created = Utc.with_ymd_and_hms(2019, 4, 1, 8, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 1, 15, 16, 45, 30).unwrap();
        RepositorySummary {
            html_url: format!("https://github.com/acme/{name}"),
            description: description.to_string(),
            stargazers_count: 42,
            forks_count: 5,
            private,
            ..RepositorySummary::new(name, "")
        }
        .with_timestamps(created, updated)
    }

    fn render(writer: ReportWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn header_only_for_empty_report() {
        let writer = ReportWriter::from_writer(Vec::new(), &vocabulary(&[])).unwrap();
        assert_eq!(writer.width(), 9);
        insta::assert_snapshot!(render(writer), @"Repository,URL,Description,Primary Language,Created At,Updated At,Stars,Forks,Private");
    }

    #[test]
    fn rows_follow_header() {
        let vocab = vocabulary(&["HTML", "Go", "C++"]);
        let mut writer = ReportWriter::from_writer(Vec::new(), &vocab).unwrap();

        let web = repo("web", "Marketing site, \"v2\"", false);
        let web_langs: LanguageBytes = [("HTML", 300), ("Go", 100)].into_iter().collect();
        writer
            .write_row(&ReportRow::compute(&web, &web_langs, &vocab))
            .unwrap();

        let engine = repo("engine", "", true);
        let engine_langs: LanguageBytes = [("C++", 2), ("Go", 1)].into_iter().collect();
        writer
            .write_row(&ReportRow::compute(&engine, &engine_langs, &vocab))
            .unwrap();

        assert_eq!(writer.rows_written(), 2);
        insta::assert_snapshot!(render(writer), @r#"
        Repository,URL,Description,Primary Language,Created At,Updated At,Stars,Forks,Private,C++ (%),Go (%),HTML (%)
        web,https://github.com/acme/web,"Marketing site, ""v2""",HTML,2019-04-01T08:00:00Z,2024-01-15T16:45:30Z,42,5,No,0.00,25.00,75.00
        engine,https://github.com/acme/engine,,C++,2019-04-01T08:00:00Z,2024-01-15T16:45:30Z,42,5,Yes,66.67,33.33,0.00
        "#);
    }

    #[test]
    fn row_from_other_vocabulary_is_rejected() {
        let mut writer = ReportWriter::from_writer(Vec::new(), &vocabulary(&["Go"])).unwrap();
        let wider = vocabulary(&["Go", "Rust"]);
        let r = repo("r", "", false);
        let row = ReportRow::compute(&r, &LanguageBytes::new(), &wider);

        let err = writer.write_row(&row).unwrap_err();
        assert!(matches!(
            err,
            ReportError::RowWidth {
                expected: 10,
                actual: 11,
                ..
            }
        ));
        assert_eq!(writer.rows_written(), 0);
    }

    #[test]
    fn create_writes_header_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let mut writer = ReportWriter::create(&path, &vocabulary(&["Go"])).unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("Private,Go (%)\n"));
    }

    #[test]
    fn create_in_missing_directory_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.csv");

        let err = ReportWriter::create(&path, &vocabulary(&[])).unwrap_err();
        assert!(matches!(err, ReportError::CreateOutput { .. }));
    }
}
