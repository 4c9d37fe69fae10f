// FILE: crates/resilience/src/lib.rs

//! Retry with exponential backoff for transient failures
//!
//! # Example
//!
//! ```rust
//! use dlshelf_resilience::RetryPolicy;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new(3)
//!     .with_initial_delay(Duration::from_millis(100));
//! assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
//! ```

mod error;
mod retry;

pub use error::{ResilienceError, ResilienceResult};
pub use retry::{retry_async, RetryPolicy};
