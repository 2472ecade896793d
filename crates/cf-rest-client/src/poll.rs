//! Polling of asynchronous server operations
//!
//! Jobs, package processing, staging, tasks and deployments all settle
//! asynchronously. A [`Poller`] reads the current state of such a resource
//! until it lands in a success or failure state, the timeout elapses, or the
//! caller cancels.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{RestClientError, RestClientResult};

/// Shortest pause between reads; smaller intervals are raised to this
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

// Stand-in deadline for timeouts too large to add to an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Timing of a poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollOptions {
    /// Pause between reads, in seconds
    #[serde(with = "duration_secs")]
    pub interval: Duration,
    /// Total wall-clock budget, in seconds
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(5 * 60),
        }
    }
}

impl PollOptions {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// (De)serialize a [`Duration`] as fractional seconds
pub mod duration_secs {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

/// A resource whose state can be observed while an operation settles
pub trait PollTarget {
    type State: PartialEq + Display;

    fn state(&self) -> Self::State;

    /// Server supplied explanation when the state is a failure state
    fn failure_reason(&self) -> Option<String> {
        None
    }
}

/// A bare state reading, for sources that are not full resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation<S> {
    pub state: S,
    pub reason: Option<String>,
}

impl<S> Observation<S> {
    pub fn new(state: S) -> Self {
        Self { state, reason: None }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl<S: Clone + PartialEq + Display> PollTarget for Observation<S> {
    type State = S;

    fn state(&self) -> S {
        self.state.clone()
    }

    fn failure_reason(&self) -> Option<String> {
        self.reason.clone()
    }
}

/// Terminal state sets plus timing
#[derive(Debug, Clone)]
pub struct Poller<S> {
    success: Vec<S>,
    failure: Vec<S>,
    options: PollOptions,
}

impl<S: PartialEq + Display> Poller<S> {
    pub fn new(success: impl Into<Vec<S>>, failure: impl Into<Vec<S>>, options: PollOptions) -> Self {
        Self {
            success: success.into(),
            failure: failure.into(),
            options,
        }
    }

    pub fn options(&self) -> &PollOptions {
        &self.options
    }

    /// Read the target until it reaches a terminal state.
    ///
    /// The first read happens immediately and later reads follow every
    /// `interval`, never more often than [`MIN_POLL_INTERVAL`]. No read is started once `timeout` has elapsed. A failed
    /// read aborts the loop with that error.
    pub async fn poll<T, F, Fut>(&self, cancel: &CancellationToken, mut fetch: F) -> RestClientResult<T>
    where
        T: PollTarget<State = S>,
        F: FnMut() -> Fut,
        Fut: Future<Output = RestClientResult<T>>,
    {
        let started = Instant::now();
        let deadline = started
            .checked_add(self.options.timeout)
            .unwrap_or_else(|| started + FAR_FUTURE);
        let interval = self.options.interval.max(MIN_POLL_INTERVAL);
        let mut reads = 0u32;

        loop {
            if cancel.is_cancelled() {
                return Err(RestClientError::Cancelled);
            }
            if reads > 0 && Instant::now() >= deadline {
                return Err(RestClientError::PollTimeout(self.options.timeout));
            }

            let target = fetch().await?;
            reads += 1;
            let state = target.state();

            if self.success.contains(&state) {
                debug!(%state, reads, "Reached success state");
                return Ok(target);
            }
            if self.failure.contains(&state) {
                let reason = target
                    .failure_reason()
                    .filter(|reason| !reason.is_empty())
                    .unwrap_or_else(|| format!("operation ended in state {state}"));
                return Err(RestClientError::OperationFailed {
                    state: state.to_string(),
                    reason,
                });
            }
            debug!(%state, reads, "Waiting for terminal state");

            let wake = Instant::now()
                .checked_add(interval)
                .map_or(deadline, |wake| wake.min(deadline));
            tokio::select! {
                _ = cancel.cancelled() => return Err(RestClientError::Cancelled),
                _ = sleep_until(wake) => {}
            }
        }
    }
}
