//! Report header and rows.
//!
//! A report has nine fixed leading columns followed by one percentage column
//! per language of the [`FrozenVocabulary`]. Rows are computed from a
//! repository's summary and its language breakdown; languages the vocabulary
//! does not know are dropped rather than added as new columns.

use crate::language::{LanguageBytes, round_percentage};
use crate::repository::{RepositorySummary, format_timestamp};
use crate::vocabulary::FrozenVocabulary;

/// The fixed columns preceding the language columns.
pub const LEADING_COLUMNS: [&str; 9] = [
    "Repository",
    "URL",
    "Description",
    "Primary Language",
    "Created At",
    "Updated At",
    "Stars",
    "Forks",
    "Private",
];

/// Primary language shown for repositories without any bytes of code.
pub const NO_PRIMARY_LANGUAGE: &str = "None";

/// Builds the header row for a vocabulary.
///
/// # Examples
///
/// ```
/// use orglangs_protocol::{LanguageVocabulary, header};
///
/// let vocabulary = ["HTML", "Go"].into_iter().collect::<LanguageVocabulary>().freeze();
/// let header = header(&vocabulary);
///
/// assert_eq!(header.len(), 11);
/// assert_eq!(header[9], "Go (%)");
/// assert_eq!(header[10], "HTML (%)");
/// ```
#[must_use]
pub fn header(vocabulary: &FrozenVocabulary) -> Vec<String> {
    LEADING_COLUMNS
        .iter()
        .map(|column| (*column).to_string())
        .chain(vocabulary.column_labels())
        .collect()
}

/// Returns the number of fields every row of this vocabulary has.
#[must_use]
pub fn row_width(vocabulary: &FrozenVocabulary) -> usize {
    LEADING_COLUMNS.len() + vocabulary.len()
}

/// One repository's line in the report.
///
/// # Examples
///
/// ```
/// use orglangs_protocol::{LanguageBytes, LanguageVocabulary, ReportRow, RepositorySummary};
///
/// let vocabulary = ["Go", "HTML"].into_iter().collect::<LanguageVocabulary>().freeze();
/// let repo = RepositorySummary::new("a", "");
/// let languages: LanguageBytes = [("Go", 800), ("HTML", 200)].into_iter().collect();
///
/// let row = ReportRow::compute(&repo, &languages, &vocabulary);
/// assert_eq!(row.primary_language(), "Go");
/// assert_eq!(row.percentages(), [80.0, 20.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow<'a> {
    repository: &'a RepositorySummary,
    primary_language: String,
    percentages: Vec<f64>,
}

impl<'a> ReportRow<'a> {
    /// Computes the row for `repository` against a frozen vocabulary.
    ///
    /// The primary language is taken from the full breakdown, so it may name
    /// a language that has no column. A breakdown with zero total bytes has
    /// no primary language and all percentages at zero.
    #[must_use]
    pub fn compute(
        repository: &'a RepositorySummary,
        languages: &LanguageBytes,
        vocabulary: &FrozenVocabulary,
    ) -> Self {
        let total = languages.total_bytes();
        let percentages = vocabulary
            .languages()
            .iter()
            .map(|language| {
                languages
                    .get(language)
                    .map_or(0.0, |bytes| round_percentage(bytes, total))
            })
            .collect();

        let primary_language = match languages.primary_language() {
            Some(language) if total > 0 => language,
            _ => NO_PRIMARY_LANGUAGE,
        };

        Self {
            repository,
            primary_language: primary_language.to_string(),
            percentages,
        }
    }

    /// Returns the repository this row describes.
    #[must_use]
    pub fn repository(&self) -> &'a RepositorySummary {
        self.repository
    }

    /// Returns the primary language, or `"None"`.
    #[must_use]
    pub fn primary_language(&self) -> &str {
        &self.primary_language
    }

    /// Returns the percentages in vocabulary order.
    #[must_use]
    pub fn percentages(&self) -> &[f64] {
        &self.percentages
    }

    /// Returns the number of fields this row serializes to.
    #[must_use]
    pub fn width(&self) -> usize {
        LEADING_COLUMNS.len() + self.percentages.len()
    }

    /// Renders the row as text fields, percentages with two decimals.
    #[must_use]
    pub fn fields(&self) -> Vec<String> {
        let repo = self.repository;
        let mut fields = Vec::with_capacity(self.width());
        fields.extend([
            repo.name.clone(),
            repo.html_url.clone(),
            repo.description.clone(),
            self.primary_language.clone(),
            format_timestamp(&repo.created_at),
            format_timestamp(&repo.updated_at),
            repo.stargazers_count.to_string(),
            repo.forks_count.to_string(),
            repo.visibility_label().to_string(),
        ]);
        fields.extend(self.percentages.iter().map(|p| format!("{p:.2}")));
        fields
    }
}
