//! Scripted stand-ins for the network and the clock.
//!
//! [`FakeTransport`] replays queued replies per request URL and records every
//! request it receives; [`RecordingPacer`] records sleeps instead of
//! performing them and advances its clock accordingly. Together they let a
//! whole run execute without network access or wall-clock waits.
//!
//! # Examples
//!
//! ```
//! use orglangs_github::fake::{FakeTransport, RecordingPacer};
//! use orglangs_github::{Phase, RetryPolicy, RunContext};
//!
//! # async fn example() -> orglangs_github::Result<()> {
//! let transport = FakeTransport::new();
//! transport.push_json("https://api.github.com/repos/acme/a/languages", r#"{"Go": 800}"#);
//!
//! let ctx = RunContext::with_pacer(transport, RetryPolicy::default(), RecordingPacer::starting_at(0));
//! let response = ctx.get(Phase::LanguageFetch, "https://api.github.com/repos/acme/a/languages", &[]).await?;
//! assert_eq!(response.body, r#"{"Go": 800}"#);
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::context::Pacer;
use crate::error::{Error, Result};
use crate::transport::{Response, Transport, with_query};

/// A queued reply.
#[derive(Debug, Clone)]
enum Reply {
    Response(Response),
    Error(String),
}

/// A transport that answers from per-URL queues.
///
/// Replies are keyed by the full request URL, query string included. Each
/// request consumes the front of its queue, except that the last reply is
/// kept and repeated. A URL with nothing queued fails with a transport error.
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    /// Creates a transport with no scripted replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for `url` requested without query parameters.
    pub fn push_response(&self, url: &str, response: Response) {
        self.push(url.to_string(), Reply::Response(response));
    }

    /// Queues a response for `url` requested with `query`.
    pub fn push_response_for(&self, url: &str, query: &[(&str, String)], response: Response) {
        self.push(with_query(url, query), Reply::Response(response));
    }

    /// Queues a `200 OK` with `body` for `url`.
    pub fn push_json(&self, url: &str, body: impl Into<String>) {
        self.push_response(url, Response::new(200, body));
    }

    /// Queues a transport failure with `message` for `url`.
    pub fn push_error(&self, url: &str, message: impl Into<String>) {
        self.push(url.to_string(), Reply::Error(message.into()));
    }

    /// Returns every request received so far, as full URLs.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Returns how many times `url` (query included) was requested.
    #[must_use]
    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| *r == url).count()
    }

    fn push(&self, key: String, reply: Reply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(key)
            .or_default()
            .push_back(reply);
    }

    fn next_reply(&self, key: &str) -> Option<Reply> {
        let mut replies = self.replies.lock().unwrap_or_else(|e| e.into_inner());
        let queue = replies.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response> {
        let key = with_query(url, query);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key.clone());

        match self.next_reply(&key) {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Error(message)) => Err(Error::Transport { message }),
            None => Err(Error::Transport {
                message: format!("no scripted reply for {key}"),
            }),
        }
    }
}

/// A pacer with a manual clock that records sleeps.
#[derive(Debug)]
pub struct RecordingPacer {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingPacer {
    /// Creates a pacer whose clock starts at `epoch` Unix seconds.
    #[must_use]
    pub fn starting_at(epoch: i64) -> Self {
        Self {
            now: Mutex::new(DateTime::from_timestamp(epoch, 0).unwrap_or(DateTime::UNIX_EPOCH)),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Returns every sleep requested so far, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Pacer for RecordingPacer {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        let advanced = TimeDelta::from_std(duration)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta));
        if let Some(advanced) = advanced {
            *now = advanced;
        }
    }
}
