use crate::error::ClientError;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Which failures are worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryFilter {
    AnyError,
    RateLimitOnly,
}

impl RetryFilter {
    pub fn allows(&self, error: &ClientError) -> bool {
        match self {
            Self::AnyError => true,
            Self::RateLimitOnly => error.is_rate_limited(),
        }
    }
}

/// Bounded retry with a geometrically growing delay.
///
/// Attempt `k` (1-based) that fails with a retryable error is followed by a wait of
/// `initial_delay * multiplier^(k-1)`, clamped to `max_delay` when set.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Option<Duration>,
    pub filter: RetryFilter,
}

/// The error that ended a retried operation and how many attempts were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryFailure {
    pub attempts: u32,
    pub error: ClientError,
}

impl RetryPolicy {
    /// Token acquisition: three attempts, 1s then 2s apart, on any failure.
    pub fn token_default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: None,
            filter: RetryFilter::AnyError,
        }
    }

    /// Submission: up to four retries on 429 only, 1s doubling to at most 10s.
    ///
    /// Delays carry no jitter, each retry waits exactly `delay_for(index)`.
    pub fn submission_default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
            max_delay: Some(Duration::from_secs(10)),
            filter: RetryFilter::RateLimitOnly,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Option<Duration>) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay before retry number `retry_index` (0 for the first retry).
    pub fn delay_for(&self, retry_index: u32) -> Duration {
        let exponent = i32::try_from(retry_index).unwrap_or(i32::MAX);
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let delay = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        match self.max_delay {
            Some(cap) => delay.min(cap),
            None => delay,
        }
    }

    /// Runs `op` until it succeeds, fails with an error the filter rejects, or the
    /// attempt budget is spent. A budget of zero still makes one attempt.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<(T, u32), RetryFailure>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => {
                    debug!(label, attempt, "operation succeeded");
                    return Ok((value, attempt));
                }
                Err(error) => {
                    if !self.filter.allows(&error) {
                        warn!(label, attempt, %error, "non-retryable failure");
                        return Err(RetryFailure {
                            attempts: attempt,
                            error,
                        });
                    }
                    if attempt >= max_attempts {
                        warn!(label, attempt, %error, "retry budget exhausted");
                        return Err(RetryFailure {
                            attempts: attempt,
                            error,
                        });
                    }

                    let delay = self.delay_for(attempt - 1);
                    warn!(
                        label,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        %error,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
