// FILE: crates/cli/src/commands.rs

use anyhow::{Context, Result};
use console::style;
use dlshelf_config::ConfigLoader;
use dlshelf_sync_engine::{SyncEngine, SyncReport};
use log::info;
use std::path::Path;

/// Loads the configuration and runs one sync to completion
pub async fn sync_library(config_path: &Path) -> Result<SyncReport> {
    let config = ConfigLoader::new(config_path)
        .load()
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    info!("Using configuration {}", config_path.display());

    let engine = SyncEngine::new(config).context("Failed to set up the sync engine")?;
    engine.run().await.context("Library sync failed")
}

/// Prints the end-of-run summary
pub fn print_report(report: &SyncReport) {
    let marker = if report.is_complete() {
        style("✓").green().bold()
    } else {
        style("!").yellow().bold()
    };

    println!("\n{} {}", marker, style("Library sync finished").bold().cyan());
    println!("{}", "=".repeat(40));
    println!("{}", report);

    if !report.added.is_empty() {
        println!("\nAdded:");
        for id in &report.added {
            println!("  {}", id);
        }
    }
    if !report.removed.is_empty() {
        println!("\nRemoved:");
        for id in &report.removed {
            println!("  {}", id);
        }
    }
}
