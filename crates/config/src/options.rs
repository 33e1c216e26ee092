//! Options for a single report run.
//!
//! [`ReportOptions`] merges the command-line arguments with the loaded
//! [`Config`] and validates the result. Command-line values win over the
//! config file.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone};

use crate::config::{Config, validate_batch_size};
use crate::error::{ConfigError, Result};

/// What one run reports on and where it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Organization whose repositories are reported.
    pub organization: String,
    /// Path of the CSV file to write.
    pub output: PathBuf,
    /// Repositories processed per batch.
    pub batch_size: usize,
}

impl ReportOptions {
    /// Builds validated options.
    ///
    /// `output` and `batch_size` fall back to [`default_output_path`] and
    /// the config file's batch size respectively.
    ///
    /// # Errors
    ///
    /// Returns an error if the organization name or the batch size is
    /// invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use orglangs_config::{Config, ReportOptions};
    ///
    /// # fn main() -> orglangs_config::Result<()> {
    /// let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
    /// let options = ReportOptions::resolve("acme", None, Some(25), &Config::default(), now)?;
    ///
    /// assert_eq!(options.batch_size, 25);
    /// assert_eq!(options.output.to_str(), Some("acme_repo_languages_20240301_123005.csv"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve<Tz: TimeZone>(
        organization: &str,
        output: Option<PathBuf>,
        batch_size: Option<usize>,
        config: &Config,
        now: DateTime<Tz>,
    ) -> Result<Self>
    where
        Tz::Offset: std::fmt::Display,
    {
        validate_organization(organization)?;
        let batch_size = batch_size.unwrap_or(config.batch_size);
        validate_batch_size(batch_size)?;

        Ok(Self {
            organization: organization.to_string(),
            output: output.unwrap_or_else(|| default_output_path(organization, &now)),
            batch_size,
        })
    }
}

/// Returns `{org}_repo_languages_{YYYYmmdd_HHMMSS}.csv` for `now`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use orglangs_config::default_output_path;
///
/// let now = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 58).unwrap();
/// assert_eq!(
///     default_output_path("rust-lang", &now).to_str(),
///     Some("rust-lang_repo_languages_20231231_235958.csv"),
/// );
/// ```
#[must_use]
pub fn default_output_path<Tz: TimeZone>(organization: &str, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    PathBuf::from(format!(
        "{organization}_repo_languages_{}.csv",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Checks that an organization name can be placed in a request path.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOrganization`] for empty names and names
/// containing `/` or whitespace.
pub fn validate_organization(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.contains('/') {
        "must not contain '/'"
    } else if name.chars().any(char::is_whitespace) {
        "must not contain whitespace"
    } else {
        return Ok(());
    };

    Err(ConfigError::InvalidOrganization {
        name: name.to_string(),
        reason,
    })
}
