// FILE: crates/sync-engine/src/error.rs

//! Error types for sync runs
//!
//! Only fatal problems are errors. Per-work fetch and image failures are
//! collected in the run report instead.

use thiserror::Error;

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that abort a sync run
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration or directory list problem
    #[error("Configuration error: {0}")]
    Config(#[from] dlshelf_config::ConfigError),

    /// Recognized prefixes could not be compiled
    #[error("Identifier error: {0}")]
    Identifier(#[from] dlshelf_core::CoreError),

    /// Catalog or image directory could not be written
    #[error("Library error: {0}")]
    Library(#[from] dlshelf_library::LibraryError),

    /// HTTP client could not be built
    #[error("Network error: {0}")]
    Network(#[from] dlshelf_network::NetworkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SyncError::from(dlshelf_config::ConfigError::ValidationError(
            "Field 'fetch.max_concurrent': must be at least 1".to_string(),
        ));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_identifier_error() {
        let err = SyncError::from(dlshelf_core::CoreError::NoPrefixes);
        assert!(err.to_string().contains("Identifier error"));
    }
}
