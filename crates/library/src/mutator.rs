// FILE: crates/library/src/mutator.rs

//! Applying additions and removals to a [`CatalogStore`]

use crate::scanner::FolderIndex;
use crate::store::{CatalogStore, Row};
use dlshelf_core::{Attribute, NormalizedWork, WorkId, NONE_SENTINEL};
use log::{debug, warn};

/// What [`apply_additions`] did with each work
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionOutcome {
    pub added: Vec<WorkId>,
    pub skipped: Vec<WorkId>,
}

/// Appends one row per value of every attribute of each work
///
/// `directory` and `creationDate` come from the folder index. A work that is
/// already catalogued, or that has no folder record, is skipped so the
/// catalog never gains partial or duplicate entries.
pub fn apply_additions(
    catalog: &mut CatalogStore,
    works: impl IntoIterator<Item = NormalizedWork>,
    folders: &FolderIndex,
) -> AdditionOutcome {
    let mut outcome = AdditionOutcome::default();

    for work in works {
        if catalog.is_catalogued(&work.id) {
            warn!("{} is already catalogued, addition skipped", work.id);
            outcome.skipped.push(work.id);
            continue;
        }

        let Some(folder) = folders.get(&work.id) else {
            warn!("{} has no folder record, addition skipped", work.id);
            outcome.skipped.push(work.id);
            continue;
        };

        for attribute in Attribute::remote() {
            let table = catalog.table_mut(attribute);
            match work.get(attribute) {
                Some(value) if !value.values().is_empty() => {
                    for v in value.values() {
                        table.push(Row::new(work.id.clone(), v.clone()));
                    }
                }
                _ => table.push(Row::new(work.id.clone(), NONE_SENTINEL)),
            }
        }

        catalog
            .table_mut(Attribute::Directory)
            .push(Row::new(work.id.clone(), folder.directory_value()));
        catalog
            .table_mut(Attribute::CreationDate)
            .push(Row::new(work.id.clone(), folder.creation_date_value()));

        debug!("Added {} to catalog", work.id);
        outcome.added.push(work.id);
    }

    outcome
}

/// Deletes every row of `id` from every table
///
/// Returns the number of rows removed.
pub fn apply_removal(catalog: &mut CatalogStore, id: &WorkId) -> usize {
    let removed = Attribute::ALL
        .into_iter()
        .map(|attribute| catalog.table_mut(attribute).remove(id))
        .sum();
    debug!("Removed {} ({} rows)", id, removed);
    removed
}
