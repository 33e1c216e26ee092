//! The run context threaded through listing, aggregation and reporting.
//!
//! A [`RunContext`] bundles everything a run needs to talk to GitHub: the
//! [`Transport`], the [`RetryPolicy`], a [`Pacer`] for clock and sleeps, and a
//! [`CancellationFlag`]. It is owned by the single flow of control, so none
//! of it needs locking.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::client::DEFAULT_API_URL;
use crate::error::{Error, Result};
use crate::retry::{Phase, Recovery, RetryPolicy};
use crate::transport::{Response, Transport};

/// Source of time and sleeps.
///
/// All waiting in a run goes through the pacer, which lets tests observe
/// every sleep without spending wall-clock time.
pub trait Pacer {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Suspends the run for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Pacer backed by the system clock and tokio timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Shared flag asking a run to stop.
///
/// Cloning yields a handle to the same flag, so a signal handler can keep
/// one clone while the run checks another.
///
/// # Examples
///
/// ```
/// use orglangs_github::CancellationFlag;
///
/// let flag = CancellationFlag::new();
/// let handle = flag.clone();
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Creates a flag that is not set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns `true` once cancellation was requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Everything a run needs to reach GitHub.
#[derive(Debug)]
pub struct RunContext<T, P = TokioPacer> {
    transport: T,
    policy: RetryPolicy,
    pacer: P,
    cancellation: CancellationFlag,
    api_url: String,
}

impl<T: Transport> RunContext<T, TokioPacer> {
    /// Creates a context using the real clock and the default API URL.
    #[must_use]
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_pacer(transport, policy, TokioPacer)
    }
}

impl<T: Transport, P: Pacer> RunContext<T, P> {
    /// Creates a context with a custom pacer.
    #[must_use]
    pub fn with_pacer(transport: T, policy: RetryPolicy, pacer: P) -> Self {
        Self {
            transport,
            policy,
            pacer,
            cancellation: CancellationFlag::new(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Uses `flag` to observe cancellation requests.
    #[must_use]
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancellation = flag;
        self
    }

    /// Sets the base URL of the REST API.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Returns the pacer.
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Returns the base URL of the REST API, without trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the cancellation flag.
    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    /// Fails with [`Error::Cancelled`] once cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if the flag is set.
    pub fn ensure_active(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Sleeps for `duration`, skipping zero-length waits.
    pub async fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        debug!(?duration, "pausing");
        self.pacer.sleep(duration).await;
    }

    /// Sends a GET request, recovering from failures according to the policy.
    ///
    /// Retries happen in place with identical parameters. When the policy
    /// says to skip or abort, the triggering error is returned; skipping
    /// only differs in that the cooldown is served first.
    ///
    /// # Errors
    ///
    /// Returns the last error once the policy stops retrying, or
    /// [`Error::Cancelled`] if cancellation was requested.
    pub async fn get(&self, phase: Phase, url: &str, query: &[(&str, String)]) -> Result<Response> {
        loop {
            self.ensure_active()?;

            let error = match self.transport.get(url, query).await {
                Ok(response) => match response.error_for_status(url) {
                    Ok(response) => return Ok(response),
                    Err(error) => error,
                },
                Err(error) => error,
            };

            match self.policy.recover(phase, &error, self.pacer.now()) {
                Recovery::RetryAfter(wait) => {
                    if matches!(error, Error::RateLimited { .. }) {
                        info!(secs = wait.as_secs(), "rate limit reached, sleeping until reset");
                    } else {
                        warn!(error = %error, secs = wait.as_secs(), "request failed, retrying after cooldown");
                    }
                    self.pause(wait).await;
                }
                Recovery::SkipAfter(wait) => {
                    if !wait.is_zero() {
                        info!(secs = wait.as_secs(), "memory allocation error, cooling down");
                    }
                    self.pause(wait).await;
                    return Err(error);
                }
                Recovery::Abort => return Err(error),
            }
        }
    }
}
