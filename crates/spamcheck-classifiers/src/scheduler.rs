//! Rate-governed, retrying call scheduler
//!
//! Every outbound call to the classification service goes through
//! [`Scheduler::schedule`], which:
//! - waits for quota capacity (and the minimum spacing between calls)
//! - bounds the call with a timeout
//! - retries transient failures with capped exponential backoff
//! - stops immediately on fatal failures
//!
//! The scheduler is borrowed mutably for each call, so calls are strictly
//! single-flight and issued in the order they are scheduled.

use spamcheck_core::{Error, Result, ServiceError};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::RequestQuota;

/// Retry and timeout settings
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry (doubles each retry)
    pub base_delay: Duration,

    /// Upper bound for a single backoff delay
    pub max_delay: Duration,

    /// Upper bound for one call
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            timeout: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Total attempts including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay after the given failed attempt (1-based): `base * 2^(attempt-1)`, capped
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Single-flight scheduler for service calls
#[derive(Debug)]
pub struct Scheduler {
    quota: RequestQuota,
    retry: RetryPolicy,
    min_interval: Duration,
    last_issued: Option<Instant>,
    requests_issued: u64,
    retries: u64,
}

impl Scheduler {
    /// Create a scheduler owning the run's quota
    pub fn new(quota: RequestQuota, retry: RetryPolicy) -> Self {
        Self {
            quota,
            retry,
            min_interval: Duration::ZERO,
            last_issued: None,
            requests_issued: 0,
            retries: 0,
        }
    }

    /// Require a minimum spacing between consecutive calls
    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    pub fn quota(&self) -> &RequestQuota {
        &self.quota
    }

    /// Calls issued so far, retries included
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// Retries issued so far
    pub fn retries(&self) -> u64 {
        self.retries
    }

    /// Issue a call under the quota, retrying transient failures.
    ///
    /// Returns `Error::ServiceUnavailable` once retries are exhausted and
    /// `Error::Config` on the first fatal failure.
    pub async fn schedule<T, F, Fut>(&mut self, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, ServiceError>>,
    {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;

        loop {
            self.acquire().await;

            debug!(attempt, max_attempts, "issuing classification call");
            let started = Instant::now();
            let outcome = match tokio::time::timeout(self.retry.timeout, call()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ServiceError::transient(format!(
                    "no reply within {:?}",
                    self.retry.timeout
                ))),
            };

            metrics::counter!("spamcheck_requests_total").increment(1);
            metrics::histogram!("spamcheck_request_latency_ms")
                .record(started.elapsed().as_secs_f64() * 1000.0);

            let failure = match outcome {
                Ok(value) => return Ok(value),
                Err(ServiceError::Fatal { reason }) => {
                    error!(attempt, %reason, "classification service rejected the request");
                    return Err(Error::config(reason));
                }
                Err(failure) => failure,
            };

            if attempt >= max_attempts {
                warn!(
                    attempts = attempt,
                    reason = failure.reason(),
                    "giving up on classification call"
                );
                return Err(Error::service_unavailable(attempt, failure.reason()));
            }

            let delay = self.retry.backoff(attempt).max(self.retry_after_delay(&failure));
            warn!(
                attempt,
                max_attempts,
                ?delay,
                reason = failure.reason(),
                "transient failure, backing off"
            );

            metrics::counter!("spamcheck_retries_total").increment(1);
            self.retries += 1;
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// The failure's retry hint, capped at the longer of the backoff cap and
    /// the quota window
    fn retry_after_delay(&self, failure: &ServiceError) -> Duration {
        let Some(hint) = failure.retry_after() else {
            return Duration::ZERO;
        };

        let ceiling = self.retry.max_delay.max(self.quota.window_duration());
        if hint > ceiling {
            warn!(?hint, ?ceiling, "retry hint exceeds the longest allowed wait, capping");
            return ceiling;
        }
        hint
    }

    /// Wait for quota capacity and spacing, then record the call
    async fn acquire(&mut self) {
        loop {
            let now = Instant::now();
            let mut wait = self.quota.wait_time(now);

            if let Some(last) = self.last_issued {
                let since = now.saturating_duration_since(last);
                if since < self.min_interval {
                    wait = wait.max(self.min_interval - since);
                }
            }

            if wait.is_zero() {
                break;
            }

            debug!(
                ?wait,
                in_window = self.quota.requests_in_window(),
                "waiting for request capacity"
            );
            tokio::time::sleep(wait).await;
        }

        let now = Instant::now();
        self.quota.record(now);
        self.last_issued = Some(now);
        self.requests_issued += 1;
    }
}
