// FILE: crates/config/src/fetch_config.rs

//! Remote fetch configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use dlshelf_resilience::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for talking to the remote catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound on in-flight fetch tasks
    pub max_concurrent: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Attempts per request, including the first
    pub retry_attempts: usize,

    /// Delay before the first retry, doubled on each further retry
    pub retry_initial_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            timeout_secs: 30,
            user_agent: format!("dlshelf/{}", env!("CARGO_PKG_VERSION")),
            retry_attempts: 3,
            retry_initial_delay_ms: 500,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Retry policy for transient transport failures
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts)
            .with_initial_delay(Duration::from_millis(self.retry_initial_delay_ms))
    }
}

impl ConfigSection for FetchConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::at_least(self.max_concurrent, 1, "max_concurrent"),
            Validator::at_least(self.timeout_secs, 1, "timeout_secs"),
            Validator::at_least(self.retry_attempts, 1, "retry_attempts"),
            Validator::not_empty(&self.user_agent, "user_agent"),
        ];

        if self.retry_attempts >= 1 {
            results.push(
                self.retry_policy()
                    .validate()
                    .map_err(|e| ValidationError::new("retry_attempts", e.to_string())),
            );
        }

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "fetch"
    }
}
