// FILE: crates/sync-engine/src/lib.rs

//! Library synchronization engine
//!
//! One run scans the library folders, reconciles them with the stored
//! catalog, fetches metadata and covers for new works with bounded
//! concurrency, merges the results and persists the catalog.
//!
//! # Example
//!
//! ```rust,no_run
//! use dlshelf_config::ConfigLoader;
//! use dlshelf_sync_engine::SyncEngine;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigLoader::new("config.toml").load()?;
//! let report = SyncEngine::new(config)?.run().await?;
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod orchestrator;
mod types;

pub use engine::SyncEngine;
pub use error::{SyncError, SyncResult};
pub use orchestrator::FetchOrchestrator;
pub use types::{FetchFailure, FetchReport, ImageFailure, SyncReport};
