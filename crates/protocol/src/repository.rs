//! Repository metadata kept for the report.
//!
//! This module defines [`RepositorySummary`], the projection of a platform
//! repository record down to the fields the report needs.

use chrono::{DateTime, SecondsFormat, Utc};

/// The subset of a repository's metadata carried through the report.
///
/// Summaries are built once while listing the organization and are never
/// modified afterwards; both aggregation passes borrow them.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use orglangs_protocol::RepositorySummary;
///
/// let created = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
/// let repo = RepositorySummary::new("widgets", "https://api.github.com/repos/acme/widgets/languages")
///     .with_timestamps(created, created);
///
/// assert_eq!(repo.name, "widgets");
/// assert_eq!(repo.visibility_label(), "No");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    /// Repository name, unique within the organization.
    pub name: String,
    /// Link to the repository's web page.
    pub html_url: String,
    /// Free-form description; empty when the platform has none.
    pub description: String,
    /// When the repository was created.
    pub created_at: DateTime<Utc>,
    /// When the repository was last updated.
    pub updated_at: DateTime<Utc>,
    /// Number of stargazers.
    pub stargazers_count: u32,
    /// Number of forks.
    pub forks_count: u32,
    /// Whether the repository is private.
    pub private: bool,
    /// API URL of the repository's language breakdown.
    pub languages_url: String,
}

impl RepositorySummary {
    /// Creates a public summary with empty metadata.
    ///
    /// Timestamps default to the Unix epoch. This is mostly useful for tests
    /// and fixtures; real summaries are produced by the repository lister.
    #[must_use]
    pub fn new(name: impl Into<String>, languages_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            html_url: String::new(),
            description: String::new(),
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
            stargazers_count: 0,
            forks_count: 0,
            private: false,
            languages_url: languages_url.into(),
        }
    }

    /// Sets the creation and last-update timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    /// Renders the visibility flag the way the report shows it.
    ///
    /// # Examples
    ///
    /// ```
    /// use orglangs_protocol::RepositorySummary;
    ///
    /// let mut repo = RepositorySummary::new("secret", "");
    /// repo.private = true;
    /// assert_eq!(repo.visibility_label(), "Yes");
    /// ```
    #[must_use]
    pub const fn visibility_label(&self) -> &'static str {
        if self.private { "Yes" } else { "No" }
    }
}

/// Formats a timestamp as the platform does (`2020-01-01T00:00:00Z`).
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_summary_is_public_and_empty() {
        let repo = RepositorySummary::new("widgets", "https://example.test/languages");
        assert_eq!(repo.name, "widgets");
        assert_eq!(repo.languages_url, "https://example.test/languages");
        assert!(repo.description.is_empty());
        assert!(!repo.private);
        assert_eq!(repo.stargazers_count, 0);
    }

    #[test]
    fn visibility_label_is_yes_or_no() {
        let mut repo = RepositorySummary::new("r", "");
        assert_eq!(repo.visibility_label(), "No");
        repo.private = true;
        assert_eq!(repo.visibility_label(), "Yes");
    }

    #[test]
    fn timestamps_use_zulu_seconds() {
        let ts = Utc.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(format_timestamp(&ts), "2021-03-04T05:06:07Z");
    }

    #[test]
    fn with_timestamps_sets_both() {
        let created = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let updated = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let repo = RepositorySummary::new("r", "").with_timestamps(created, updated);
        assert_eq!(repo.created_at, created);
        assert_eq!(repo.updated_at, updated);
    }
}
