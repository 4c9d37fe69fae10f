// FILE: crates/library/src/persistence.rs

//! Attribute files on disk
//!
//! Each attribute is stored as `<name>.json`: a JSON array of records with
//! the keys `"DLCode"` and the attribute name, e.g.
//! `[{"DLCode": "RJ111111", "title": "Foo"}]`.

use crate::error::{LibraryError, LibraryResult};
use crate::store::{AttributeTable, CatalogStore, Row};
use dlshelf_core::{Attribute, WorkId};
use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Record key holding the work identifier
pub const ID_KEY: &str = "DLCode";

/// Result of loading the catalog
#[derive(Debug)]
pub enum CatalogLoad {
    /// Every attribute file was present and readable
    Loaded(CatalogStore),
    /// Some file was missing or unreadable; the catalog starts empty
    Rebuilt { store: CatalogStore, reason: String },
}

impl CatalogLoad {
    pub fn into_store(self) -> CatalogStore {
        match self {
            CatalogLoad::Loaded(store) => store,
            CatalogLoad::Rebuilt { store, .. } => store,
        }
    }

    pub fn was_rebuilt(&self) -> bool {
        matches!(self, CatalogLoad::Rebuilt { .. })
    }
}

/// Reads and writes the per-attribute catalog files in one directory
pub struct CatalogPersistence {
    dir: PathBuf,
}

impl CatalogPersistence {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing one attribute
    pub fn table_path(&self, attribute: Attribute) -> PathBuf {
        self.dir.join(format!("{}.json", attribute.name()))
    }

    /// Loads every attribute table
    ///
    /// The catalog is trusted only as a whole: if any file is missing or
    /// cannot be read, an empty catalog is returned so every on-disk work is
    /// fetched again.
    pub fn load(&self) -> CatalogLoad {
        let mut tables = Vec::with_capacity(Attribute::ALL.len());

        for attribute in Attribute::ALL {
            match self.load_table(attribute) {
                Ok(table) => tables.push(table),
                Err(e) => {
                    warn!("Catalog will be rebuilt: {}", e);
                    return CatalogLoad::Rebuilt {
                        store: CatalogStore::new(),
                        reason: e.to_string(),
                    };
                }
            }
        }

        let store = CatalogStore::from_tables(tables);
        info!(
            "Loaded catalog from {} ({} work(s))",
            self.dir.display(),
            store.len()
        );
        CatalogLoad::Loaded(store)
    }

    /// Loads one attribute table
    pub fn load_table(&self, attribute: Attribute) -> LibraryResult<AttributeTable> {
        let path = self.table_path(attribute);
        let contents = fs::read_to_string(&path).map_err(|e| LibraryError::io(&path, e))?;
        let rows = decode_rows(attribute, &contents).map_err(|message| {
            LibraryError::MalformedTable {
                path: path.clone(),
                message,
            }
        })?;
        Ok(AttributeTable::with_rows(attribute, rows))
    }

    /// Writes every attribute table
    ///
    /// All tables are staged in temporary files and checked before any of
    /// them replaces its file. If a replacement still fails, the tables
    /// already replaced are restored, so a failed save leaves the previous
    /// catalog on disk.
    pub fn save(&self, store: &CatalogStore) -> LibraryResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| LibraryError::io(&self.dir, e))?;

        let staged = store
            .tables()
            .map(|table| self.stage_table(table))
            .collect::<LibraryResult<Vec<_>>>()?;

        for (path, _) in &staged {
            ensure_replaceable(path)?;
        }

        let mut replaced: Vec<(PathBuf, Option<Vec<u8>>)> = Vec::with_capacity(staged.len());
        for (path, temp_file) in staged {
            let previous = fs::read(&path).ok();
            if let Err(e) = temp_file.persist(&path) {
                self.restore(replaced);
                return Err(LibraryError::Persist {
                    path,
                    source: e.error,
                });
            }
            replaced.push((path, previous));
        }

        info!(
            "Saved catalog to {} ({} work(s))",
            self.dir.display(),
            store.len()
        );
        Ok(())
    }

    fn stage_table(&self, table: &AttributeTable) -> LibraryResult<(PathBuf, NamedTempFile)> {
        let path = self.table_path(table.attribute());
        let json = serde_json::to_string(&encode_rows(table)).map_err(|e| LibraryError::Encode {
            path: path.clone(),
            source: e,
        })?;

        let temp_file = self.temp_file_with(json.as_bytes())?;
        debug!("Staged {} row(s) for {}", table.len(), path.display());
        Ok((path, temp_file))
    }

    fn temp_file_with(&self, contents: &[u8]) -> LibraryResult<NamedTempFile> {
        let mut temp_file =
            NamedTempFile::new_in(&self.dir).map_err(|e| LibraryError::io(&self.dir, e))?;
        temp_file
            .write_all(contents)
            .map_err(|e| LibraryError::io(temp_file.path(), e))?;
        temp_file
            .flush()
            .map_err(|e| LibraryError::io(temp_file.path(), e))?;
        Ok(temp_file)
    }

    fn restore(&self, replaced: Vec<(PathBuf, Option<Vec<u8>>)>) {
        for (path, previous) in replaced.into_iter().rev() {
            let result = match previous {
                Some(contents) => self.temp_file_with(&contents).and_then(|temp_file| {
                    temp_file
                        .persist(&path)
                        .map(|_| ())
                        .map_err(|e| LibraryError::Persist {
                            path: path.clone(),
                            source: e.error,
                        })
                }),
                None => fs::remove_file(&path).map_err(|e| LibraryError::io(&path, e)),
            };

            match result {
                Ok(()) => debug!("Restored {}", path.display()),
                Err(e) => error!("Could not restore {}: {}", path.display(), e),
            }
        }
    }
}

/// Fails when `path` cannot be replaced by a renamed file
fn ensure_replaceable(path: &Path) -> LibraryResult<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => Err(LibraryError::Persist {
            path: path.to_path_buf(),
            source: io::Error::other("a directory is in the way"),
        }),
        _ => Ok(()),
    }
}

fn encode_rows(table: &AttributeTable) -> Value {
    let key = table.attribute().name();
    Value::Array(
        table
            .rows()
            .iter()
            .map(|row| {
                let mut record = Map::new();
                record.insert(ID_KEY.to_string(), Value::String(row.id.to_string()));
                record.insert(key.to_string(), Value::String(row.value.clone()));
                Value::Object(record)
            })
            .collect(),
    )
}

fn decode_rows(attribute: Attribute, contents: &str) -> Result<Vec<Row>, String> {
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(contents).map_err(|e| e.to_string())?;
    let key = attribute.name();

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let id = record
                .get(ID_KEY)
                .and_then(Value::as_str)
                .ok_or_else(|| format!("record {} has no {}", i, ID_KEY))?;
            let id = WorkId::parse(id).map_err(|e| format!("record {}: {}", i, e))?;
            let value = match record.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => {
                    return Err(format!("record {} has no {}", i, key));
                }
                Some(other) => other.to_string(),
            };
            Ok(Row::new(id, value))
        })
        .collect()
}
