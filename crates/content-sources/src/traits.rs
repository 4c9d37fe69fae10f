// FILE: crates/content-sources/src/traits.rs

use crate::SourceResult;
use async_trait::async_trait;
use bytes::Bytes;
use dlshelf_core::{RawWorkRecord, WorkId};

/// Remote catalog capable of describing works
///
/// Implementations are shared across concurrent fetch tasks.
#[async_trait]
pub trait WorkSource: Send + Sync {
    /// Remote page locator for one work
    fn locator(&self, id: &WorkId) -> SourceResult<String>;

    /// Fetches and extracts the raw record for one work
    async fn fetch_work(&self, task: &FetchTask) -> SourceResult<FetchedWork>;

    /// Downloads a cover image
    async fn fetch_image(&self, locator: &str) -> SourceResult<Bytes>;

    /// Builds the fetch task for `id`
    fn task(&self, id: &WorkId) -> SourceResult<FetchTask> {
        Ok(FetchTask::new(id.clone(), self.locator(id)?))
    }
}

/// One work to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub id: WorkId,
    pub locator: String,
}

impl FetchTask {
    pub fn new(id: WorkId, locator: impl Into<String>) -> Self {
        Self {
            id,
            locator: locator.into(),
        }
    }
}

/// A successfully fetched work page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedWork {
    pub record: RawWorkRecord,
    pub cover_locator: Option<String>,
}

impl FetchedWork {
    pub fn new(record: RawWorkRecord) -> Self {
        Self {
            record,
            cover_locator: None,
        }
    }

    pub fn with_cover(mut self, locator: impl Into<String>) -> Self {
        self.cover_locator = Some(locator.into());
        self
    }
}
