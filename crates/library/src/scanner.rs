// FILE: crates/library/src/scanner.rs

use chrono::{DateTime, Local};
use dlshelf_core::{FolderRecord, IdentifierExtractor, WorkId};
use log::{debug, info, warn};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Folders found by one scan, keyed for the later merge
#[derive(Debug, Clone, Default)]
pub struct FolderIndex {
    records: Vec<FolderRecord>,
    by_id: HashMap<WorkId, usize>,
}

impl FolderIndex {
    /// Builds an index, keeping the first record for each identifier
    pub fn from_records(records: impl IntoIterator<Item = FolderRecord>) -> Self {
        let mut index = Self::default();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Returns false when the identifier was already present
    fn insert(&mut self, record: FolderRecord) -> bool {
        if self.by_id.contains_key(&record.id) {
            return false;
        }
        self.by_id.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    pub fn get(&self, id: &WorkId) -> Option<&FolderRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn ids(&self) -> BTreeSet<WorkId> {
        self.by_id.keys().cloned().collect()
    }

    pub fn records(&self) -> &[FolderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Finds work folders directly beneath each library root
pub struct FolderScanner {
    extractor: IdentifierExtractor,
}

impl FolderScanner {
    pub fn new(extractor: IdentifierExtractor) -> Self {
        Self { extractor }
    }

    /// Scans every root and returns one record per recognized folder
    ///
    /// Only immediate child directories are matched. Roots that do not exist
    /// are skipped with a warning; a root listed twice is scanned once.
    pub fn scan(&self, roots: &[PathBuf]) -> FolderIndex {
        info!("Starting folder scan of {} root(s)", roots.len());

        let mut index = FolderIndex::default();
        let mut scanned_roots = HashSet::new();

        for root in roots {
            if !root.is_dir() {
                warn!("Library root does not exist: {}", root.display());
                continue;
            }

            let canonical = root.canonicalize().unwrap_or_else(|_| root.clone());
            if !scanned_roots.insert(canonical) {
                debug!("Skipping already scanned root: {}", root.display());
                continue;
            }

            for record in self.scan_root(root) {
                let directory = record.directory.clone();
                if !index.insert(record) {
                    warn!(
                        "Duplicate identifier folder ignored: {}",
                        directory.display()
                    );
                }
            }
        }

        info!("Folder scan completed: {} work(s) found", index.len());
        index
    }

    fn scan_root(&self, root: &Path) -> Vec<FolderRecord> {
        let mut records = Vec::new();

        // Work folders may be symlinks into other volumes.
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Error walking {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let Some(id) = self.extractor.extract(&name) else {
                continue;
            };

            let modified = match entry.metadata().map(|m| m.modified()) {
                Ok(Ok(modified)) => modified,
                Ok(Err(e)) => {
                    warn!("No modification time for {}: {}", entry.path().display(), e);
                    continue;
                }
                Err(e) => {
                    warn!("Cannot stat {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            records.push(FolderRecord::new(
                id,
                entry.path(),
                DateTime::<Local>::from(modified),
            ));
        }

        records
    }
}
