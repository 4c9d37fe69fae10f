// FILE: crates/library/src/images.rs

//! Cover images: one file per work, named `<identifier>.<ext>`

use crate::error::{LibraryError, LibraryResult};
use dlshelf_core::WorkId;
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

const DEFAULT_EXTENSION: &str = "jpg";

/// Identifiers that already have a cover image
pub struct ImageIndex;

impl ImageIndex {
    /// Lists works with a cover in `dir`, creating the directory if needed
    ///
    /// The identifier is the file name up to its first `.`; files whose stem
    /// is not an identifier are ignored.
    pub fn scan(dir: &Path) -> LibraryResult<BTreeSet<WorkId>> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| LibraryError::io(dir, e))?;
            info!("Created images directory {}", dir.display());
            return Ok(BTreeSet::new());
        }

        let entries = fs::read_dir(dir).map_err(|e| LibraryError::io(dir, e))?;
        let mut ids = BTreeSet::new();

        for entry in entries {
            let entry = entry.map_err(|e| LibraryError::io(dir, e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let name = entry.file_name();
            let name = name.to_string_lossy();
            let stem = name.split('.').next().unwrap_or_default();
            if let Ok(id) = WorkId::parse(stem) {
                ids.insert(id);
            }
        }

        debug!("{} cover image(s) in {}", ids.len(), dir.display());
        Ok(ids)
    }
}

/// Writes cover images into one directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the cover for `id` fetched from `locator` is written to
    pub fn path_for(&self, id: &WorkId, locator: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", id, extension_from_locator(locator)))
    }

    /// Saves one cover image, returning its path
    pub async fn save(&self, id: &WorkId, locator: &str, bytes: &[u8]) -> LibraryResult<PathBuf> {
        let path = self.path_for(id, locator);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| LibraryError::io(&path, e))?;
        debug!("Saved cover for {} to {}", id, path.display());
        Ok(path)
    }
}

/// Image extension from the final path segment of a locator
///
/// The text after the last `.` of the segment is used, lower-cased. Locators
/// that are not absolute URLs, or whose segment has no extension, fall back
/// to `jpg`.
pub fn extension_from_locator(locator: &str) -> String {
    let Ok(url) = Url::parse(locator) else {
        return DEFAULT_EXTENSION.to_string();
    };
    let segment = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();

    match segment.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && !ext.is_empty()
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
