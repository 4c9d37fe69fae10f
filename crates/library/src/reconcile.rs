// FILE: crates/library/src/reconcile.rs

//! Delta between the works on disk and the works in the catalog

use crate::mutator::apply_removal;
use crate::store::CatalogStore;
use dlshelf_core::WorkId;
use log::info;
use std::collections::BTreeSet;

/// Works to purge from and works to fetch into the catalog
///
/// The two sets are always disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Catalogued but no longer on disk
    pub remove: BTreeSet<WorkId>,
    /// On disk but not yet catalogued
    pub fetch: BTreeSet<WorkId>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.fetch.is_empty()
    }
}

/// Compares one snapshot of on-disk identifiers with the catalog
pub fn reconcile(on_disk: &BTreeSet<WorkId>, catalog: &CatalogStore) -> Reconciliation {
    let catalogued = catalog.catalogued_ids();

    Reconciliation {
        remove: catalogued.difference(on_disk).cloned().collect(),
        fetch: on_disk.difference(&catalogued).cloned().collect(),
    }
}

/// Reconciles and applies every removal before returning
pub fn reconcile_and_remove(
    on_disk: &BTreeSet<WorkId>,
    catalog: &mut CatalogStore,
) -> Reconciliation {
    let delta = reconcile(on_disk, catalog);

    for id in &delta.remove {
        apply_removal(catalog, id);
    }

    info!(
        "Reconciled: {} to remove, {} to fetch",
        delta.remove.len(),
        delta.fetch.len()
    );
    delta
}
