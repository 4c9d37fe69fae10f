// FILE: crates/sync-engine/src/orchestrator.rs

//! Concurrent fetching of work metadata and cover images

use crate::types::{FetchFailure, FetchReport, ImageFailure};
use dlshelf_content_sources::{FetchedWork, SourceError, WorkSource};
use dlshelf_core::{RawWorkRecord, WorkId};
use dlshelf_library::ImageStore;
use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Result of one fetch task
enum TaskOutcome {
    Fetched {
        record: RawWorkRecord,
        image_failure: Option<ImageFailure>,
    },
    Failed(FetchFailure),
}

/// Fetches a batch of works with at most `max_concurrent` in flight
///
/// A failing work never affects its siblings: it is reported and the batch
/// carries on. Tasks only produce values; the catalog is merged afterwards
/// by the caller.
pub struct FetchOrchestrator {
    source: Arc<dyn WorkSource>,
    images: ImageStore,
    max_concurrent: usize,
}

impl FetchOrchestrator {
    pub fn new(source: Arc<dyn WorkSource>, images: ImageStore, max_concurrent: usize) -> Self {
        Self {
            source,
            images,
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Fetches every work in `fetch_set`
    ///
    /// Covers are downloaded only for works not in `have_image`. Records come
    /// back in completion order.
    pub async fn fetch_all(
        &self,
        fetch_set: &BTreeSet<WorkId>,
        have_image: &BTreeSet<WorkId>,
    ) -> FetchReport {
        let mut report = FetchReport::default();
        if fetch_set.is_empty() {
            return report;
        }

        info!(
            "Fetching {} work(s), up to {} at a time",
            fetch_set.len(),
            self.max_concurrent
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut handles = Vec::with_capacity(fetch_set.len());

        for id in fetch_set {
            let semaphore = Arc::clone(&semaphore);
            let source = Arc::clone(&self.source);
            let images = self.images.clone();
            let want_image = !have_image.contains(id);
            let task_id = id.clone();

            let handle = tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return TaskOutcome::Failed(FetchFailure {
                        id: task_id,
                        locator: None,
                        class: "cancelled",
                        message: "fetch gate closed".to_string(),
                    });
                };
                fetch_one(source.as_ref(), &images, task_id, want_image).await
            });
            handles.push((id.clone(), handle));
        }

        for (id, handle) in handles {
            match handle.await {
                Ok(TaskOutcome::Fetched {
                    record,
                    image_failure,
                }) => {
                    report.records.push(record);
                    report.image_failures.extend(image_failure);
                }
                Ok(TaskOutcome::Failed(failure)) => report.failures.push(failure),
                Err(e) => {
                    error!("Fetch task for {} did not complete: {}", id, e);
                    report.failures.push(FetchFailure {
                        id,
                        locator: None,
                        class: "task",
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Fetch finished: {} succeeded, {} failed, {} image failure(s)",
            report.records.len(),
            report.failures.len(),
            report.image_failures.len()
        );
        report
    }
}

fn failure(id: WorkId, locator: Option<String>, error: &SourceError) -> TaskOutcome {
    warn!(
        "Fetch failed for {} ({}) [{}]: {}",
        id,
        locator.as_deref().unwrap_or("no locator"),
        error.class(),
        error
    );
    TaskOutcome::Failed(FetchFailure {
        id,
        locator,
        class: error.class(),
        message: error.to_string(),
    })
}

async fn fetch_one(
    source: &dyn WorkSource,
    images: &ImageStore,
    id: WorkId,
    want_image: bool,
) -> TaskOutcome {
    let task = match source.task(&id) {
        Ok(task) => task,
        Err(e) => return failure(id, None, &e),
    };

    let FetchedWork {
        record,
        cover_locator,
    } = match source.fetch_work(&task).await {
        Ok(work) => work,
        Err(e) => return failure(id, Some(task.locator), &e),
    };
    debug!("Fetched metadata for {}", id);

    let image_failure = if want_image {
        save_cover(source, images, &id, cover_locator).await.err()
    } else {
        None
    };

    TaskOutcome::Fetched {
        record,
        image_failure,
    }
}

async fn save_cover(
    source: &dyn WorkSource,
    images: &ImageStore,
    id: &WorkId,
    locator: Option<String>,
) -> Result<(), ImageFailure> {
    let image_failure = |locator: Option<String>, message: String| {
        warn!(
            "Cover download failed for {} ({}): {}",
            id,
            locator.as_deref().unwrap_or("no locator"),
            message
        );
        ImageFailure {
            id: id.clone(),
            locator,
            message,
        }
    };

    let Some(locator) = locator else {
        return Err(image_failure(None, "page has no cover image".to_string()));
    };

    let bytes = match source.fetch_image(&locator).await {
        Ok(bytes) => bytes,
        Err(e) => return Err(image_failure(Some(locator), e.to_string())),
    };

    match images.save(id, &locator, &bytes).await {
        Ok(_) => Ok(()),
        Err(e) => Err(image_failure(Some(locator), e.to_string())),
    }
}
