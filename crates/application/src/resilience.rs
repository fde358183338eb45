//! Resilient request executor
//!
//! Wraps a single upstream call with retry and backoff:
//! rate-limited calls wait for the server's retry hint (or back off
//! exponentially when there is none), transient network faults back off
//! exponentially, and everything else is propagated on the first failure.

use std::future::Future;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::ports::{Clock, IngestObserver, NetworkFault, RetryNotice, RetryReason, SourceError};

/// Matches "retry after N" hints in rate-limit messages.
static RETRY_AFTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)retry\s+after\s+(\d+)").expect("valid regex"));

/// Hints below this value are epoch seconds, above it epoch milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Retry budget and backoff shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per call, including the first
    pub max_attempts: u32,
    /// Backoff base; the n-th retry waits `base * 2^(n-1)`
    pub base_delay: Duration,
    /// Upper bound on any single wait
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(60_000),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff after `failures` failed attempts (1-based).
    #[must_use]
    pub fn backoff(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1);
        self.base_delay
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_delay)
    }
}

/// Failure of a call after the executor gave up on it.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A non-retryable failure, propagated on first occurrence.
    #[error(transparent)]
    Rejected(SourceError),

    /// The last attempt failed with a transient network fault.
    #[error("network error ({fault}) after {attempts} attempts")]
    Network {
        /// Fault class of the last failure
        fault: NetworkFault,
        /// Attempts made
        attempts: u32,
        /// Last underlying failure
        source: SourceError,
    },

    /// The last attempt was rate limited.
    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded {
        /// Attempts made
        attempts: u32,
    },

    /// Cancelled before a call or during a backoff wait.
    #[error("request cancelled")]
    Cancelled,
}

/// Executes upstream calls under a [`RetryPolicy`].
pub struct RequestExecutor {
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn IngestObserver>,
}

impl RequestExecutor {
    /// Creates a new executor.
    #[must_use]
    pub fn new(
        policy: RetryPolicy,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn IngestObserver>,
    ) -> Self {
        Self {
            policy,
            clock,
            observer,
        }
    }

    /// Runs `call` until it succeeds, fails for good, or the budget is spent.
    ///
    /// `operation` names the call in retry notices.
    ///
    /// # Errors
    /// - `RequestError::Rejected` for any non-retryable failure
    /// - `RequestError::Network` / `RequestError::RateLimitExceeded` once
    ///   the attempts are exhausted
    /// - `RequestError::Cancelled` if `cancel` fires
    pub async fn execute<T, F, Fut>(
        &self,
        operation: &str,
        cancel: &CancellationToken,
        mut call: F,
    ) -> Result<T, RequestError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(RequestError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(RequestError::Cancelled),
                outcome = call() => outcome,
            };

            let error = match outcome {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            attempt += 1;

            let (delay, reason) = match &error {
                SourceError::RateLimited { message } => {
                    let hinted = message.as_deref().and_then(|m| self.hinted_delay(m));
                    (
                        hinted.unwrap_or_else(|| self.policy.backoff(attempt)),
                        RetryReason::RateLimited {
                            hinted: hinted.is_some(),
                        },
                    )
                }
                SourceError::Network { fault, .. } => {
                    (self.policy.backoff(attempt), RetryReason::Network(*fault))
                }
                _ => return Err(RequestError::Rejected(error)),
            };

            if attempt >= max_attempts {
                return Err(match reason {
                    RetryReason::Network(fault) => RequestError::Network {
                        fault,
                        attempts: attempt,
                        source: error,
                    },
                    RetryReason::RateLimited { .. } => {
                        RequestError::RateLimitExceeded { attempts: attempt }
                    }
                });
            }

            let delay = delay.min(self.policy.max_delay);
            self.observer.retry_scheduled(&RetryNotice {
                operation: operation.to_string(),
                attempt,
                max_attempts,
                delay,
                reason,
            });

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(RequestError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Computes the wait suggested by a rate-limit message, if it carries a
    /// usable "retry after" epoch in the future.
    fn hinted_delay(&self, message: &str) -> Option<Duration> {
        let until = parse_retry_after(message)?;
        let wait_ms = until - self.clock.epoch_millis();
        u64::try_from(wait_ms)
            .ok()
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

/// Parses a "retry after N" hint into epoch milliseconds.
#[must_use]
pub fn parse_retry_after(message: &str) -> Option<i64> {
    let value: i64 = RETRY_AFTER.captures(message)?.get(1)?.as_str().parse().ok()?;
    if value < EPOCH_MILLIS_THRESHOLD {
        value.checked_mul(1000)
    } else {
        Some(value)
    }
}
