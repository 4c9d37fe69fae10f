// FILE: crates/content-sources/src/lib.rs

//! Remote catalog sources for work metadata and cover images

mod dlsite;
mod locators;
mod page;
mod traits;

pub use dlsite::DlsiteSource;
pub use locators::LocatorTemplates;
pub use page::parse_work_page;
use std::fmt;
pub use traits::{FetchTask, FetchedWork, WorkSource};

/// Result type for content source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors from content sources
///
/// All of these are per-work failures; none aborts a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The remote catalog has no page for this locator
    NotFound(String),
    /// Any other non-success status
    Status { status: u16, locator: String },
    /// Transport failure after retries
    NetworkError(String),
    /// The page did not have the expected shape
    ParseError(String),
    /// No locator template for this identifier family
    UnsupportedPrefix(String),
}

impl SourceError {
    /// Short failure class used in logs and reports
    pub fn class(&self) -> &'static str {
        match self {
            SourceError::NotFound(_) => "not-found",
            SourceError::Status { .. } => "http-status",
            SourceError::NetworkError(_) => "transport",
            SourceError::ParseError(_) => "parse",
            SourceError::UnsupportedPrefix(_) => "unsupported-prefix",
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NotFound(locator) => write!(f, "Not found: {}", locator),
            SourceError::Status { status, locator } => {
                write!(f, "HTTP {} for {}", status, locator)
            }
            SourceError::NetworkError(e) => write!(f, "Network error: {}", e),
            SourceError::ParseError(e) => write!(f, "Parse error: {}", e),
            SourceError::UnsupportedPrefix(prefix) => {
                write!(f, "No locator for prefix {}", prefix)
            }
        }
    }
}

impl std::error::Error for SourceError {}

impl From<dlshelf_network::NetworkError> for SourceError {
    fn from(e: dlshelf_network::NetworkError) -> Self {
        use dlshelf_network::NetworkError;

        match e {
            NetworkError::Status { status: 404, url } => SourceError::NotFound(url),
            NetworkError::Status { status, url } => SourceError::Status {
                status,
                locator: url,
            },
            other => SourceError::NetworkError(other.to_string()),
        }
    }
}
