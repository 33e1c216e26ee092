//! Request pacing configuration.
//!
//! This module provides the [`PacingConfig`] type which holds the fixed
//! delays taken between successful requests:
//!
//! - After each page of the repository listing: 1 second by default
//! - After each language fetch: 500 milliseconds by default
//!
//! Both keep a run well below GitHub's secondary rate limits. Waiting for a
//! rate-limit reset is separate and not configurable here.

use std::time::Duration;

use serde::Deserialize;

/// Default delay between listing pages, in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1000;

/// Default delay after each language fetch, in milliseconds.
pub const DEFAULT_FETCH_DELAY_MS: u64 = 500;

/// Maximum allowed delay (1 minute).
pub const MAX_DELAY_MS: u64 = 60_000;

/// Configuration for request pacing.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use orglangs_config::PacingConfig;
///
/// let config = PacingConfig::default();
/// assert_eq!(config.page_delay(), Duration::from_secs(1));
/// assert_eq!(config.fetch_delay(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PacingConfig {
    /// Delay between listing pages, in milliseconds.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Delay after each language fetch, in milliseconds.
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
}

fn default_page_delay_ms() -> u64 {
    DEFAULT_PAGE_DELAY_MS
}

fn default_fetch_delay_ms() -> u64 {
    DEFAULT_FETCH_DELAY_MS
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            fetch_delay_ms: DEFAULT_FETCH_DELAY_MS,
        }
    }
}

impl PacingConfig {
    /// Creates a pacing configuration with the given delays.
    ///
    /// # Examples
    ///
    /// ```
    /// use orglangs_config::PacingConfig;
    ///
    /// let config = PacingConfig::new(0, 250);
    /// assert_eq!(config.page_delay_ms, 0);
    /// assert_eq!(config.fetch_delay_ms, 250);
    /// ```
    #[must_use]
    pub fn new(page_delay_ms: u64, fetch_delay_ms: u64) -> Self {
        Self {
            page_delay_ms,
            fetch_delay_ms,
        }
    }

    /// Returns the delay between listing pages.
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Returns the delay after each language fetch.
    #[must_use]
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    /// Validates the pacing configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either delay exceeds [`MAX_DELAY_MS`].
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("page_delay_ms", self.page_delay_ms),
            ("fetch_delay_ms", self.fetch_delay_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(crate::ConfigError::InvalidPacing {
                    reason: format!("{name} {value} exceeds maximum of {MAX_DELAY_MS} ms"),
                });
            }
        }
        Ok(())
    }
}
