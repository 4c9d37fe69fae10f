// FILE: crates/sync-engine/src/types.rs

//! Results of fetch batches and sync runs

use dlshelf_core::{RawWorkRecord, WorkId};
use std::collections::BTreeSet;
use std::fmt;

/// A work whose metadata could not be fetched this run
///
/// The work stays out of the catalog and is fetched again next run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub id: WorkId,
    pub locator: Option<String>,
    pub class: &'static str,
    pub message: String,
}

/// A cover image that could not be stored
///
/// The work's metadata record is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFailure {
    pub id: WorkId,
    pub locator: Option<String>,
    pub message: String,
}

/// Outcome of one fetch batch
#[derive(Debug, Default)]
pub struct FetchReport {
    pub records: Vec<RawWorkRecord>,
    pub failures: Vec<FetchFailure>,
    pub image_failures: Vec<ImageFailure>,
}

/// Outcome of one sync run
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Recognized work folders found on disk
    pub scanned: usize,
    /// Works purged because their folder is gone
    pub removed: BTreeSet<WorkId>,
    /// Works that were not catalogued and were fetched
    pub fetch_requested: usize,
    /// Works added to the catalog
    pub added: Vec<WorkId>,
    pub fetch_failures: Vec<FetchFailure>,
    pub image_failures: Vec<ImageFailure>,
    /// Catalogued works dropped for having incomplete rows
    pub repaired: BTreeSet<WorkId>,
    /// The stored catalog was missing or unreadable
    pub catalog_rebuilt: bool,
}

impl SyncReport {
    /// True when every requested fetch succeeded
    pub fn is_complete(&self) -> bool {
        self.fetch_failures.is_empty()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scanned:         {}", self.scanned)?;
        if self.catalog_rebuilt {
            writeln!(f, "Catalog:         rebuilt")?;
        }
        if !self.repaired.is_empty() {
            writeln!(f, "Repaired:        {}", self.repaired.len())?;
        }
        writeln!(f, "Removed:         {}", self.removed.len())?;
        writeln!(f, "Fetch requested: {}", self.fetch_requested)?;
        writeln!(f, "Added:           {}", self.added.len())?;
        writeln!(f, "Fetch failures:  {}", self.fetch_failures.len())?;
        for failure in &self.fetch_failures {
            writeln!(f, "  {} [{}] {}", failure.id, failure.class, failure.message)?;
        }
        write!(f, "Image failures:  {}", self.image_failures.len())
    }
}
