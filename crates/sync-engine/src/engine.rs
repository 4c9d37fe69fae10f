// FILE: crates/sync-engine/src/engine.rs

//! One run-to-completion library sync

use crate::error::SyncResult;
use crate::orchestrator::FetchOrchestrator;
use crate::types::SyncReport;
use dlshelf_config::{load_library_directories, Config};
use dlshelf_content_sources::{DlsiteSource, LocatorTemplates, WorkSource};
use dlshelf_core::{normalize, IdentifierExtractor};
use dlshelf_library::{
    apply_additions, apply_removal, reconcile_and_remove, CatalogLoad, CatalogPersistence,
    FolderScanner, ImageIndex, ImageStore,
};
use dlshelf_network::{Client, ClientConfig};
use log::{info, warn};
use std::sync::Arc;

/// Brings the stored catalog in line with the library folders
pub struct SyncEngine {
    config: Config,
    source: Arc<dyn WorkSource>,
}

impl SyncEngine {
    /// Creates an engine fetching from DLsite over HTTP
    pub fn new(config: Config) -> SyncResult<Self> {
        let client_config = ClientConfig::default()
            .with_timeout(config.fetch.timeout())
            .with_user_agent(config.fetch.user_agent.clone())
            .with_retry_policy(config.fetch.retry_policy());
        let client = Client::with_config(client_config)?;
        let locators = LocatorTemplates::new(config.locators.clone());

        Ok(Self::with_source(
            config,
            Arc::new(DlsiteSource::new(client, locators)),
        ))
    }

    /// Creates an engine using any work source
    pub fn with_source(config: Config, source: Arc<dyn WorkSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs scan, reconcile, fetch, merge and persist
    ///
    /// Configuration problems abort before the catalog is touched. Per-work
    /// fetch and image failures are reported, not raised. A failure to write
    /// the catalog aborts the run.
    pub async fn run(&self) -> SyncResult<SyncReport> {
        let roots = load_library_directories(&self.config.library_directories_file)?;
        let extractor = IdentifierExtractor::new(self.config.recognized_prefixes.iter().cloned())?;
        info!("Recognizing prefixes: {}", extractor.prefixes().join(", "));

        let folders = FolderScanner::new(extractor).scan(&roots);
        let mut report = SyncReport {
            scanned: folders.len(),
            ..Default::default()
        };

        let persistence = CatalogPersistence::new(&self.config.library_indexed_info_path);
        let load = persistence.load();
        if let CatalogLoad::Rebuilt { reason, .. } = &load {
            warn!("Starting from an empty catalog: {}", reason);
        }
        report.catalog_rebuilt = load.was_rebuilt();
        let mut catalog = load.into_store();

        report.repaired = catalog.inconsistent_works();
        for id in &report.repaired {
            warn!("{} has incomplete catalog rows and will be fetched again", id);
            apply_removal(&mut catalog, id);
        }

        let delta = reconcile_and_remove(&folders.ids(), &mut catalog);
        report.removed = delta.remove;
        report.fetch_requested = delta.fetch.len();

        let have_image = ImageIndex::scan(&self.config.images_path)?;
        let orchestrator = FetchOrchestrator::new(
            Arc::clone(&self.source),
            ImageStore::new(&self.config.images_path),
            self.config.fetch.max_concurrent,
        );
        let fetched = orchestrator.fetch_all(&delta.fetch, &have_image).await;
        report.fetch_failures = fetched.failures;
        report.image_failures = fetched.image_failures;

        let works = fetched.records.iter().map(normalize);
        report.added = apply_additions(&mut catalog, works, &folders).added;

        persistence.save(&catalog)?;

        info!(
            "Sync finished: {} added, {} removed, {} failed",
            report.added.len(),
            report.removed.len(),
            report.fetch_failures.len()
        );
        Ok(report)
    }
}
