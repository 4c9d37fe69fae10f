// FILE: crates/resilience/src/error.rs

//! Error types for resilience operations

use thiserror::Error;

/// Result type for resilience operations
pub type ResilienceResult<T> = Result<T, ResilienceError>;

/// Errors that can occur in resilience operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResilienceError {
    /// A retry policy that can never run an attempt
    #[error("Invalid retry policy: {0}")]
    InvalidPolicy(String),
}
