//! Rate-limit headers returned with every GitHub API response.
//!
//! GitHub reports the remaining request quota in `x-ratelimit-remaining`
//! and the moment it resets, as Unix seconds, in `x-ratelimit-reset`.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Header carrying the number of requests left in the current window.
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Header carrying the Unix timestamp at which the window resets.
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate-limit state parsed from a response.
///
/// Missing or unparsable headers are kept as `None`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use chrono::DateTime;
/// use orglangs_github::RateLimitStatus;
///
/// let status = RateLimitStatus::from_header_values(Some("0"), Some("1700000100"));
/// assert!(status.is_exhausted());
///
/// let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
/// assert_eq!(status.wait_until_reset(now, Duration::from_secs(10)), Duration::from_secs(101));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests left in the current window.
    pub remaining: Option<u64>,
    /// Unix timestamp (seconds) at which the window resets.
    pub reset_epoch: Option<i64>,
}

impl RateLimitStatus {
    /// Parses the raw header values.
    #[must_use]
    pub fn from_header_values(remaining: Option<&str>, reset: Option<&str>) -> Self {
        Self {
            remaining: remaining.and_then(|v| v.trim().parse().ok()),
            reset_epoch: reset.and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Returns `true` if the response said no requests are left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Returns the reset moment, if known.
    #[must_use]
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        self.reset_epoch
            .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
    }

    /// Computes how long to wait for the quota to reset.
    ///
    /// The wait lasts until one second past the reset moment, and never less
    /// than `floor`. An unknown reset moment waits exactly `floor`.
    #[must_use]
    pub fn wait_until_reset(&self, now: DateTime<Utc>, floor: Duration) -> Duration {
        let secs = self
            .reset_epoch
            .unwrap_or(0)
            .saturating_sub(now.timestamp())
            .saturating_add(1);
        Duration::from_secs(u64::try_from(secs).unwrap_or(0)).max(floor)
    }
}
