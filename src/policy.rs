//! Outcome classification and the fixed backoff schedule.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::{AttemptOutcome, ClientOptions, FetchError, Response};

/// Ordered delays applied between attempts.
///
/// The retry after attempt `n` waits `delays[n - 1]`; a call makes at most
/// `len() + 1` attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrySchedule {
    delays: Vec<Duration>,
}

impl RetrySchedule {
    pub fn new(delays: impl Into<Vec<Duration>>) -> Self {
        Self {
            delays: delays.into(),
        }
    }

    pub fn from_millis(delays: impl IntoIterator<Item = u64>) -> Self {
        Self {
            delays: delays.into_iter().map(Duration::from_millis).collect(),
        }
    }

    /// A schedule that never retries.
    pub fn none() -> Self {
        Self { delays: Vec::new() }
    }

    /// Delay before the attempt following `attempt` (1-based).
    pub fn delay_after(&self, attempt: usize) -> Option<Duration> {
        attempt
            .checked_sub(1)
            .and_then(|index| self.delays.get(index))
            .copied()
    }

    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self::from_millis([1_000, 3_000, 10_000])
    }
}

/// What the executor should do after an attempt.
#[derive(Debug)]
pub enum RetryDecision {
    Succeed(Response),
    Fail(FetchError),
    Retry(Duration),
}

/// Decides whether an attempt succeeded, failed for good, or should be retried.
///
/// Immutable once built, so one policy may serve concurrent calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    schedule: RetrySchedule,
    non_retryable: BTreeSet<u16>,
}

impl RetryPolicy {
    pub fn new(schedule: RetrySchedule, non_retryable: impl IntoIterator<Item = u16>) -> Self {
        Self {
            schedule,
            non_retryable: non_retryable.into_iter().collect(),
        }
    }

    /// A policy that makes a single attempt.
    pub fn no_retry() -> Self {
        Self::new(RetrySchedule::none(), default_non_retryable())
    }

    pub fn schedule(&self) -> &RetrySchedule {
        &self.schedule
    }

    pub fn is_non_retryable(&self, status: u16) -> bool {
        self.non_retryable.contains(&status)
    }

    /// Classifies `outcome`, the result of attempt number `attempt` (1-based).
    pub fn decide(&self, attempt: usize, outcome: AttemptOutcome) -> RetryDecision {
        let cause = match outcome {
            AttemptOutcome::Response(response) if response.is_success() => {
                return RetryDecision::Succeed(response);
            }
            AttemptOutcome::Response(response) => {
                let terminal = self.is_non_retryable(response.status);
                let cause = FetchError::Http {
                    status: response.status,
                    body: response.body,
                };
                if terminal {
                    return RetryDecision::Fail(cause);
                }
                cause
            }
            AttemptOutcome::TransportError(err) => FetchError::Transport(err),
        };

        match self.schedule.delay_after(attempt) {
            Some(delay) => RetryDecision::Retry(delay),
            None => RetryDecision::Fail(cause),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetrySchedule::default(), default_non_retryable())
    }
}

impl From<&ClientOptions> for RetryPolicy {
    fn from(options: &ClientOptions) -> Self {
        Self::new(
            RetrySchedule::from_millis(options.retry_delays_ms.iter().copied()),
            options.non_retryable_statuses.iter().copied(),
        )
    }
}

fn default_non_retryable() -> [u16; 4] {
    [400, 401, 403, 404]
}
