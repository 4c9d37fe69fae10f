// FILE: crates/config/src/error.rs

//! Error types for the configuration system

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading configuration
///
/// Every variant is fatal for a sync run.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse config file
    #[error("Failed to parse config file at {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Failed to read the library directory list
    #[error("Failed to read library directory list at {path}: {source}")]
    DirectoryListReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The library directory list is not a JSON array of paths
    #[error("Malformed library directory list at {path}: {source}")]
    DirectoryListParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Config file contains invalid values
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    pub(crate) fn from_validation(errors: &[ValidationError]) -> Self {
        let message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        ConfigError::ValidationError(message)
    }
}

/// Validation error for a specific config field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the field (e.g., "fetch.max_concurrent")
    pub field: String,

    /// Human-readable error message
    pub message: String,

    /// The invalid value, if available
    pub value: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Creates a validation error with the invalid value
    pub fn with_value(
        field: impl Into<String>,
        message: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }

    /// Qualifies the field with the name of the section it belongs to
    pub fn in_section(mut self, section: &str) -> Self {
        self.field = format!("{}.{}", section, self.field);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field '{}': {}", self.field, self.message)?;
        if let Some(ref value) = self.value {
            write!(f, " (got: {})", value)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
