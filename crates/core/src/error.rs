// FILE: crates/core/src/error.rs

//! Error types for the core domain

use thiserror::Error;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A recognized-prefix entry cannot be used in the folder pattern
    #[error("Invalid identifier prefix: '{0}'")]
    InvalidPrefix(String),

    /// The prefix set is empty, so nothing could ever be recognized
    #[error("No identifier prefixes configured")]
    NoPrefixes,

    /// A string is not a valid work identifier
    #[error("Invalid work identifier: '{0}'")]
    InvalidIdentifier(String),

    /// Unknown catalog attribute name
    #[error("Unknown attribute: '{0}'")]
    UnknownAttribute(String),
}
