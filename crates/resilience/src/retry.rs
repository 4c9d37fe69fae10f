// FILE: crates/resilience/src/retry.rs

//! Retry policies with exponential backoff

use crate::error::{ResilienceError, ResilienceResult};
use log::debug;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first attempt)
    max_attempts: usize,
    /// Delay before the first retry
    initial_delay: Duration,
    /// Upper bound for any single delay
    max_delay: Duration,
    /// Backoff multiplier
    multiplier: f64,
}

impl RetryPolicy {
    /// Creates a new retry policy
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }

    /// A policy that runs the operation once
    pub fn no_retry() -> Self {
        Self::new(1)
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Delay to wait before retry number `attempt` (1-based)
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_millis() as f64 * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay.as_millis() as f64);

        Duration::from_millis(capped as u64)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Rejects policies that could never run an attempt
    pub fn validate(&self) -> ResilienceResult<()> {
        if self.max_attempts == 0 {
            return Err(ResilienceError::InvalidPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(ResilienceError::InvalidPolicy(format!(
                "multiplier must be >= 1.0, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the policy's attempts are used up
///
/// The last error is returned unchanged so callers keep their own error type.
pub async fn retry_async<F, Fut, T, E, R>(
    policy: &RetryPolicy,
    is_retryable: R,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts().max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && is_retryable(&e) => {
                let delay = policy.delay_for_attempt(attempt);
                debug!(
                    "Attempt {}/{} failed ({}), retrying in {:?}",
                    attempt, max_attempts, e, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
