// FILE: crates/sync-engine/tests/sync_tests.rs

//! Integration tests for the fetch orchestrator and sync runs

use async_trait::async_trait;
use bytes::Bytes;
use dlshelf_config::Config;
use dlshelf_content_sources::{FetchTask, FetchedWork, SourceError, SourceResult, WorkSource};
use dlshelf_core::{Attribute, RawWorkRecord, WorkId};
use dlshelf_library::{CatalogLoad, CatalogPersistence, ImageStore};
use dlshelf_sync_engine::{FetchOrchestrator, SyncEngine, SyncError};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

fn id(s: &str) -> WorkId {
    WorkId::parse(s).unwrap()
}

fn ids(list: &[&str]) -> BTreeSet<WorkId> {
    list.iter().map(|s| id(s)).collect()
}

/// In-process work source with scripted failures
#[derive(Default)]
struct FakeSource {
    missing: HashSet<WorkId>,
    broken_images: HashSet<WorkId>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    page_requests: Mutex<Vec<WorkId>>,
    image_requests: AtomicUsize,
}

impl FakeSource {
    fn missing(mut self, list: &[&str]) -> Self {
        self.missing.extend(list.iter().map(|s| id(s)));
        self
    }

    fn broken_images(mut self, list: &[&str]) -> Self {
        self.broken_images.extend(list.iter().map(|s| id(s)));
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn page_requests(&self) -> Vec<WorkId> {
        self.page_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkSource for FakeSource {
    fn locator(&self, id: &WorkId) -> SourceResult<String> {
        if id.prefix() == "RJ" {
            Ok(format!("fake://work/{}", id))
        } else {
            Err(SourceError::UnsupportedPrefix(id.prefix().to_string()))
        }
    }

    async fn fetch_work(&self, task: &FetchTask) -> SourceResult<FetchedWork> {
        self.page_requests.lock().unwrap().push(task.id.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.missing.contains(&task.id) {
            return Err(SourceError::NotFound(task.locator.clone()));
        }

        let mut record = RawWorkRecord::new(task.id.clone()).with_title(format!("Title {}", task.id));
        record.circle = Some("Circle\n".to_string());
        record.author = Some("Author A / Author B".to_string());
        record.release_date = Some("Jun 1st 2020".to_string());
        record.tags = vec!["Healing".to_string()];

        Ok(FetchedWork::new(record).with_cover(format!("fake://img/{}_img_main.png", task.id)))
    }

    async fn fetch_image(&self, locator: &str) -> SourceResult<Bytes> {
        self.image_requests.fetch_add(1, Ordering::SeqCst);
        if self
            .broken_images
            .iter()
            .any(|id| locator.contains(id.as_str()))
        {
            return Err(SourceError::Status {
                status: 500,
                locator: locator.to_string(),
            });
        }
        Ok(Bytes::from_static(b"PNGDATA"))
    }
}

struct Library {
    _temp_dir: TempDir,
    root: PathBuf,
    config: Config,
}

impl Library {
    fn new(folders: &[&str]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("voice");
        fs::create_dir_all(&root).unwrap();
        for name in folders {
            fs::create_dir_all(root.join(name)).unwrap();
        }

        let dirs_file = temp_dir.path().join("library_directories.json");
        fs::write(&dirs_file, format!("[{:?}]", root.to_string_lossy())).unwrap();

        let config = Config {
            images_path: temp_dir.path().join("images"),
            library_indexed_info_path: temp_dir.path().join("library"),
            library_directories_file: dirs_file,
            ..Config::default()
        };

        Self {
            _temp_dir: temp_dir,
            root,
            config,
        }
    }

    fn engine(&self, source: Arc<FakeSource>) -> SyncEngine {
        SyncEngine::with_source(self.config.clone(), source)
    }

    fn catalog(&self) -> dlshelf_library::CatalogStore {
        match CatalogPersistence::new(&self.config.library_indexed_info_path).load() {
            CatalogLoad::Loaded(store) => store,
            CatalogLoad::Rebuilt { reason, .. } => panic!("catalog not persisted: {reason}"),
        }
    }

    fn image(&self, name: &str) -> PathBuf {
        self.config.images_path.join(name)
    }
}

fn orchestrator(source: Arc<FakeSource>, images: &Path, max_concurrent: usize) -> FetchOrchestrator {
    FetchOrchestrator::new(source, ImageStore::new(images), max_concurrent)
}

#[tokio::test]
async fn test_one_failure_does_not_abort_batch() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::default().missing(&["RJ000003"]));
    let batch = ids(&["RJ000001", "RJ000002", "RJ000003", "RJ000004", "RJ000005"]);

    let report = orchestrator(source, temp_dir.path(), 8)
        .fetch_all(&batch, &BTreeSet::new())
        .await;

    assert_eq!(report.records.len(), 4);
    assert!(report.records.iter().all(|r| r.id != id("RJ000003")));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, id("RJ000003"));
    assert_eq!(report.failures[0].class, "not-found");
    assert_eq!(
        report.failures[0].locator.as_deref(),
        Some("fake://work/RJ000003")
    );
}

#[tokio::test]
async fn test_unsupported_prefix_is_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::default());

    let report = orchestrator(source, temp_dir.path(), 2)
        .fetch_all(&ids(&["RJ000001", "VJ000001"]), &BTreeSet::new())
        .await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.failures[0].class, "unsupported-prefix");
    assert!(report.failures[0].locator.is_none());
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::default().with_delay(Duration::from_millis(20)));
    let batch: BTreeSet<WorkId> = (1..=12).map(|n| id(&format!("RJ{:06}", n))).collect();

    let report = orchestrator(Arc::clone(&source), temp_dir.path(), 3)
        .fetch_all(&batch, &BTreeSet::new())
        .await;

    assert_eq!(report.records.len(), 12);
    let peak = source.max_in_flight.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak in-flight {peak}");
    assert!(peak >= 2, "fetches did not overlap");
}

#[tokio::test]
async fn test_image_failure_keeps_record() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::default().broken_images(&["RJ000002"]));

    let report = orchestrator(source, temp_dir.path(), 4)
        .fetch_all(&ids(&["RJ000001", "RJ000002"]), &BTreeSet::new())
        .await;

    assert_eq!(report.records.len(), 2);
    assert!(report.failures.is_empty());
    assert_eq!(report.image_failures.len(), 1);
    assert_eq!(report.image_failures[0].id, id("RJ000002"));
    assert!(temp_dir.path().join("RJ000001.png").is_file());
    assert!(!temp_dir.path().join("RJ000002.png").exists());
}

#[tokio::test]
async fn test_existing_images_are_not_downloaded() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::default());

    let report = orchestrator(Arc::clone(&source), temp_dir.path(), 4)
        .fetch_all(&ids(&["RJ000001", "RJ000002"]), &ids(&["RJ000001"]))
        .await;

    assert_eq!(report.records.len(), 2);
    assert_eq!(source.image_requests.load(Ordering::SeqCst), 1);
    assert!(!temp_dir.path().join("RJ000001.png").exists());
}

#[tokio::test]
async fn test_empty_batch() {
    let temp_dir = TempDir::new().unwrap();
    let source = Arc::new(FakeSource::default());

    let report = orchestrator(Arc::clone(&source), temp_dir.path(), 4)
        .fetch_all(&BTreeSet::new(), &BTreeSet::new())
        .await;

    assert!(report.records.is_empty());
    assert!(source.page_requests().is_empty());
}

#[tokio::test]
async fn test_first_run_catalogs_new_library() {
    let library = Library::new(&["[RJ111111] Foo", "[RJ222222] Bar", "Not a work"]);
    let source = Arc::new(FakeSource::default());

    let report = library.engine(Arc::clone(&source)).run().await.unwrap();

    assert_eq!(report.scanned, 2);
    assert!(report.catalog_rebuilt);
    assert!(report.removed.is_empty());
    assert_eq!(report.fetch_requested, 2);
    assert_eq!(report.added.len(), 2);

    let catalog = library.catalog();
    assert_eq!(catalog.table(Attribute::Title).len(), 2);
    for work in ["RJ111111", "RJ222222"] {
        let work = id(work);
        for attribute in Attribute::ALL {
            assert!(!catalog.values(attribute, &work).is_empty(), "{attribute}");
        }
    }

    let foo = id("RJ111111");
    let expected_dir = library.root.join("[RJ111111] Foo").to_string_lossy().into_owned();
    assert_eq!(
        catalog.values(Attribute::Directory, &foo),
        vec![expected_dir.as_str()]
    );
    assert_eq!(catalog.values(Attribute::CreationDate, &foo).len(), 1);
    assert_eq!(catalog.values(Attribute::Author, &foo), vec!["Author A", "Author B"]);
    assert_eq!(catalog.values(Attribute::Circle, &foo), vec!["Circle"]);
    assert_eq!(catalog.values(Attribute::ReleaseDate, &foo), vec!["Jun 1 2020"]);
    assert_eq!(catalog.values(Attribute::VoiceActor, &foo), vec!["None"]);
    assert!(library.image("RJ111111.png").is_file());
    assert!(library.image("RJ222222.png").is_file());
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let library = Library::new(&["[RJ111111] Foo", "[RJ222222] Bar"]);
    let source = Arc::new(FakeSource::default());
    library.engine(Arc::clone(&source)).run().await.unwrap();
    let first = library.catalog();

    let report = library.engine(Arc::clone(&source)).run().await.unwrap();

    assert!(!report.catalog_rebuilt);
    assert!(report.removed.is_empty());
    assert_eq!(report.fetch_requested, 0);
    assert!(report.added.is_empty());
    assert_eq!(source.page_requests().len(), 2);
    assert_eq!(library.catalog(), first);
}

#[tokio::test]
async fn test_deleted_folder_is_purged() {
    let library = Library::new(&["[RJ999999] Old"]);
    let source = Arc::new(FakeSource::default());
    library.engine(Arc::clone(&source)).run().await.unwrap();

    fs::remove_dir(library.root.join("[RJ999999] Old")).unwrap();
    fs::create_dir(library.root.join("[RJ111111] New")).unwrap();
    let report = library.engine(source).run().await.unwrap();

    assert_eq!(report.removed, ids(&["RJ999999"]));
    assert_eq!(report.added, vec![id("RJ111111")]);
    let catalog = library.catalog();
    assert_eq!(catalog.row_count(&id("RJ999999")), 0);
    assert!(catalog.is_catalogued(&id("RJ111111")));
}

#[tokio::test]
async fn test_failed_fetch_is_retried_next_run() {
    let library = Library::new(&["[RJ111111] Foo", "[RJ222222] Bar"]);

    let failing = Arc::new(FakeSource::default().missing(&["RJ222222"]));
    let report = library.engine(failing).run().await.unwrap();
    assert_eq!(report.added, vec![id("RJ111111")]);
    assert_eq!(report.fetch_failures.len(), 1);
    assert!(!library.catalog().is_catalogued(&id("RJ222222")));

    let healthy = Arc::new(FakeSource::default());
    let report = library.engine(Arc::clone(&healthy)).run().await.unwrap();
    assert_eq!(report.fetch_requested, 1);
    assert_eq!(healthy.page_requests(), vec![id("RJ222222")]);
    assert!(library.catalog().is_catalogued(&id("RJ222222")));
}

#[tokio::test]
async fn test_incomplete_work_is_repaired() {
    let library = Library::new(&["[RJ111111] Foo", "[RJ222222] Bar"]);
    library
        .engine(Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap();

    let circle_file = CatalogPersistence::new(&library.config.library_indexed_info_path)
        .table_path(Attribute::Circle);
    fs::write(&circle_file, r#"[{"DLCode":"RJ111111","circle":"Circle"}]"#).unwrap();

    let source = Arc::new(FakeSource::default());
    let report = library.engine(Arc::clone(&source)).run().await.unwrap();

    assert_eq!(report.repaired, ids(&["RJ222222"]));
    assert_eq!(source.page_requests(), vec![id("RJ222222")]);
    assert!(library.catalog().inconsistent_works().is_empty());
}

#[tokio::test]
async fn test_rows_without_title_are_purged() {
    let library = Library::new(&["[RJ111111] Foo", "[RJ222222] Bar"]);
    library
        .engine(Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap();

    let title_file = CatalogPersistence::new(&library.config.library_indexed_info_path)
        .table_path(Attribute::Title);
    fs::write(&title_file, r#"[{"DLCode":"RJ111111","title":"Foo"}]"#).unwrap();
    fs::remove_dir(library.root.join("[RJ222222] Bar")).unwrap();

    let report = library
        .engine(Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap();

    assert_eq!(report.repaired, ids(&["RJ222222"]));
    assert_eq!(report.fetch_requested, 0);
    assert_eq!(library.catalog().row_count(&id("RJ222222")), 0);
}

#[tokio::test]
async fn test_missing_attribute_file_refetches_everything() {
    let library = Library::new(&["[RJ111111] Foo", "[RJ222222] Bar"]);
    library
        .engine(Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap();

    let tag_file = CatalogPersistence::new(&library.config.library_indexed_info_path)
        .table_path(Attribute::Tag);
    fs::remove_file(tag_file).unwrap();

    let source = Arc::new(FakeSource::default());
    let report = library.engine(Arc::clone(&source)).run().await.unwrap();

    assert!(report.catalog_rebuilt);
    assert_eq!(report.fetch_requested, 2);
    assert_eq!(library.catalog().table(Attribute::Title).len(), 2);
    // Covers already on disk are reused.
    assert_eq!(source.image_requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_directory_list_is_fatal() {
    let library = Library::new(&["[RJ111111] Foo"]);
    fs::remove_file(&library.config.library_directories_file).unwrap();
    let source = Arc::new(FakeSource::default());

    let err = library.engine(Arc::clone(&source)).run().await.unwrap_err();

    assert!(matches!(err, SyncError::Config(_)));
    assert!(source.page_requests().is_empty());
    assert!(!library.config.library_indexed_info_path.exists());
}

#[tokio::test]
async fn test_unwritable_catalog_is_fatal() {
    let mut library = Library::new(&["[RJ111111] Foo"]);
    let blocker = library.config.library_directories_file.with_file_name("blocker");
    fs::write(&blocker, b"file, not a directory").unwrap();
    library.config.library_indexed_info_path = blocker.join("library");

    let err = library
        .engine(Arc::new(FakeSource::default()))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Library(_)));
}
