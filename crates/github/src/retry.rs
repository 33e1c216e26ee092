//! Recovery decisions for failed requests.
//!
//! Listing an organization and fetching one repository's languages fail
//! differently: a listing failure ends the run, while a language fetch
//! failure only costs that repository. [`RetryPolicy::recover`] encodes the
//! decision table for both [`Phase`]s:
//!
//! | Failure | Listing | Language fetch |
//! |---------|---------|----------------|
//! | 404 | abort (organization not found) | skip |
//! | 403 with no quota left | wait for reset (≥ 60 s), retry | wait for reset (≥ 10 s), retry |
//! | out of memory | cool down 60 s, retry | cool down 30 s, skip |
//! | anything else | abort | skip |
//!
//! The policy also owns the pacing delays taken between successful requests.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::rate_limit::RateLimitStatus;

/// Which kind of request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Paginating the organization's repositories.
    Listing,
    /// Fetching one repository's language breakdown.
    LanguageFetch,
}

/// What to do about a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Wait, then send the identical request again.
    RetryAfter(Duration),
    /// Wait, then give up on this request and carry on with the next one.
    SkipAfter(Duration),
    /// Give up on the whole operation.
    Abort,
}

/// Timing parameters for rate-limit compliance and failure recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Shortest wait for a rate-limit reset while listing.
    pub listing_reset_floor: Duration,
    /// Shortest wait for a rate-limit reset anywhere else.
    pub reset_floor: Duration,
    /// Cooldown after an out-of-memory failure while listing.
    pub listing_memory_cooldown: Duration,
    /// Cooldown after an out-of-memory failure fetching languages.
    pub fetch_memory_cooldown: Duration,
    /// Delay between listing pages.
    pub page_delay: Duration,
    /// Delay after each language fetch.
    pub fetch_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            listing_reset_floor: Duration::from_secs(60),
            reset_floor: Duration::from_secs(10),
            listing_memory_cooldown: Duration::from_secs(60),
            fetch_memory_cooldown: Duration::from_secs(30),
            page_delay: Duration::from_secs(1),
            fetch_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Overrides the pacing delays, keeping the recovery timings.
    #[must_use]
    pub fn with_pacing(mut self, page_delay: Duration, fetch_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self.fetch_delay = fetch_delay;
        self
    }

    /// Decides how to recover from `error` raised during `phase`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use chrono::Utc;
    /// use orglangs_github::{Error, Phase, Recovery, RetryPolicy};
    ///
    /// let policy = RetryPolicy::default();
    /// let not_found = Error::NotFound { url: "https://api.github.com/orgs/nope/repos".into() };
    ///
    /// assert_eq!(policy.recover(Phase::Listing, &not_found, Utc::now()), Recovery::Abort);
    /// assert_eq!(
    ///     policy.recover(Phase::LanguageFetch, &not_found, Utc::now()),
    ///     Recovery::SkipAfter(Duration::ZERO),
    /// );
    /// ```
    #[must_use]
    pub fn recover(&self, phase: Phase, error: &Error, now: DateTime<Utc>) -> Recovery {
        if matches!(error, Error::Cancelled) {
            return Recovery::Abort;
        }

        if let Error::RateLimited { reset_at } = error {
            let status = RateLimitStatus {
                remaining: Some(0),
                reset_epoch: reset_at.map(|at| at.timestamp()),
            };
            let floor = match phase {
                Phase::Listing => self.listing_reset_floor,
                Phase::LanguageFetch => self.reset_floor,
            };
            return Recovery::RetryAfter(status.wait_until_reset(now, floor));
        }

        if error.is_resource_exhaustion() {
            return match phase {
                Phase::Listing => Recovery::RetryAfter(self.listing_memory_cooldown),
                Phase::LanguageFetch => Recovery::SkipAfter(self.fetch_memory_cooldown),
            };
        }

        match phase {
            Phase::Listing => Recovery::Abort,
            Phase::LanguageFetch => Recovery::SkipAfter(Duration::ZERO),
        }
    }

    /// Returns how long to wait before requesting the next listing page.
    ///
    /// An exhausted quota waits for the reset; otherwise the fixed page delay
    /// applies.
    #[must_use]
    pub fn delay_between_pages(&self, rate_limit: &RateLimitStatus, now: DateTime<Utc>) -> Duration {
        if rate_limit.is_exhausted() {
            rate_limit.wait_until_reset(now, self.reset_floor)
        } else {
            self.page_delay
        }
    }
}
