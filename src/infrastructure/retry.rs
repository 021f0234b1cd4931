// src/infrastructure/retry.rs
use std::{future::Future, time::Duration};

use thiserror::Error;
use tracing::warn;

/// Bounded retry with a per-attempt timeout and capped exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

#[derive(Debug, Error)]
pub enum RetryError<E: std::error::Error + 'static> {
    #[error("{operation} timed out after {attempts} attempt(s)")]
    TimedOut { operation: String, attempts: u32 },
    #[error("{operation} failed after {attempts} attempt(s): {source}")]
    Failed {
        operation: String,
        attempts: u32,
        #[source]
        source: E,
    },
}

impl RetryPolicy {
    /// `retries` extra attempts after the first one.
    pub fn new(retries: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            attempt_timeout,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(5),
        }
    }

    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max.max(initial);
        self
    }

    /// Delay before retrying after the `failed_attempts`-th failure.
    pub fn backoff_for(&self, failed_attempts: u32) -> Duration {
        let exponent = failed_attempts.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }

    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut attempt: F) -> Result<T, RetryError<E>>
    where
        E: std::error::Error + 'static,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut made = 0;
        loop {
            made += 1;
            let outcome = tokio::time::timeout(self.attempt_timeout, attempt()).await;
            let last = match outcome {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) => {
                    warn!(operation, attempt = made, error = %err, "attempt failed");
                    RetryError::Failed {
                        operation: operation.to_string(),
                        attempts: made,
                        source: err,
                    }
                }
                Err(_) => {
                    warn!(operation, attempt = made, timeout = ?self.attempt_timeout, "attempt timed out");
                    RetryError::TimedOut {
                        operation: operation.to_string(),
                        attempts: made,
                    }
                }
            };

            if made >= max_attempts {
                return Err(last);
            }
            tokio::time::sleep(self.backoff_for(made)).await;
        }
    }
}
