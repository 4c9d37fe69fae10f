// FILE: crates/network/src/error.rs

//! Error types for network operations

use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur during network operations
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transport failure: connect, timeout, body read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Building the underlying client failed
    #[error("Client setup failed: {0}")]
    Setup(String),
}

impl NetworkError {
    /// Transport failures and 5xx responses are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Http(_) => true,
            NetworkError::Status { status, .. } => (500..600).contains(status),
            NetworkError::Setup(_) => false,
        }
    }

    /// Returns the HTTP status for non-success responses
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            NetworkError::Http(e) => e.status().map(|s| s.as_u16()),
            NetworkError::Setup(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
