// FILE: crates/core/src/types/work.rs

//! Work identifiers and folder records

use crate::error::{CoreError, CoreResult};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Format used for the `creationDate` attribute rows
pub const CREATION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical identifier of one catalogued work, e.g. `RJ123456`
///
/// An identifier is an alphabetic prefix naming the catalog family followed by
/// a numeric suffix. It is the join key across every attribute table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkId(String);

impl WorkId {
    /// Parses a canonical identifier
    pub fn parse(s: &str) -> CoreResult<Self> {
        let digits_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| CoreError::InvalidIdentifier(s.to_string()))?;

        let (prefix, suffix) = s.split_at(digits_at);
        let valid = !prefix.is_empty()
            && prefix.chars().all(|c| c.is_ascii_alphabetic())
            && suffix.chars().all(|c| c.is_ascii_digit());

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::InvalidIdentifier(s.to_string()))
        }
    }

    /// The alphabetic family prefix (`RJ` for `RJ123456`)
    pub fn prefix(&self) -> &str {
        let end = self
            .0
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(self.0.len());
        &self.0[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WorkId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WorkId> for String {
    fn from(id: WorkId) -> Self {
        id.0
    }
}

impl AsRef<str> for WorkId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One on-disk folder whose name carries a recognized identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRecord {
    pub id: WorkId,
    pub directory: PathBuf,
    pub created: DateTime<Local>,
}

impl FolderRecord {
    pub fn new(id: WorkId, directory: impl Into<PathBuf>, created: DateTime<Local>) -> Self {
        Self {
            id,
            directory: directory.into(),
            created,
        }
    }

    /// Value stored in the `directory` attribute table
    pub fn directory_value(&self) -> String {
        self.directory.to_string_lossy().into_owned()
    }

    /// Value stored in the `creationDate` attribute table
    pub fn creation_date_value(&self) -> String {
        self.created.format(CREATION_DATE_FORMAT).to_string()
    }
}
