// FILE: crates/library/src/lib.rs

//! dlshelf library catalog
//!
//! Folder scanning, the per-attribute [`CatalogStore`], reconciliation
//! against the works found on disk, and the JSON and image files that back
//! the catalog.

pub mod error;
pub mod images;
pub mod mutator;
pub mod persistence;
pub mod reconcile;
pub mod scanner;
pub mod store;

pub use error::{LibraryError, LibraryResult};
pub use images::{extension_from_locator, ImageIndex, ImageStore};
pub use mutator::{apply_additions, apply_removal, AdditionOutcome};
pub use persistence::{CatalogLoad, CatalogPersistence, ID_KEY};
pub use reconcile::{reconcile, reconcile_and_remove, Reconciliation};
pub use scanner::{FolderIndex, FolderScanner};
pub use store::{AttributeTable, CatalogStore, Row};
