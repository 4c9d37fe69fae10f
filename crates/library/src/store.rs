// FILE: crates/library/src/store.rs

//! In-memory catalog: one row table per attribute

use dlshelf_core::{Attribute, WorkId};
use std::collections::{BTreeMap, BTreeSet};

/// One `(identifier, value)` row of an attribute table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: WorkId,
    pub value: String,
}

impl Row {
    pub fn new(id: WorkId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// Ordered rows of one attribute
///
/// Multi-valued attributes may hold several rows per identifier;
/// single-valued attributes hold at most one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTable {
    attribute: Attribute,
    rows: Vec<Row>,
}

impl AttributeTable {
    pub fn new(attribute: Attribute) -> Self {
        Self {
            attribute,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(attribute: Attribute, rows: Vec<Row>) -> Self {
        Self { attribute, rows }
    }

    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Values for one identifier, in row order
    pub fn values_for(&self, id: &WorkId) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| &row.id == id)
            .map(|row| row.value.as_str())
            .collect()
    }

    pub fn contains(&self, id: &WorkId) -> bool {
        self.rows.iter().any(|row| &row.id == id)
    }

    /// Drops every row of `id`, returning how many were removed
    pub fn remove(&mut self, id: &WorkId) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| &row.id != id);
        before - self.rows.len()
    }

    pub fn ids(&self) -> BTreeSet<WorkId> {
        self.rows.iter().map(|row| row.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Every attribute table of the catalog
///
/// A work is catalogued when it has a row in the [`Attribute::PRESENCE`]
/// table. The store always holds a table for every [`Attribute`], stored in
/// [`Attribute::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStore {
    tables: Vec<AttributeTable>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// An empty catalog
    pub fn new() -> Self {
        Self {
            tables: Attribute::ALL.into_iter().map(AttributeTable::new).collect(),
        }
    }

    /// Builds a store from loaded tables; attributes not given start empty
    pub fn from_tables(tables: impl IntoIterator<Item = AttributeTable>) -> Self {
        let mut store = Self::new();
        for table in tables {
            let attribute = table.attribute();
            *store.table_mut(attribute) = table;
        }
        store
    }

    pub fn table(&self, attribute: Attribute) -> &AttributeTable {
        &self.tables[attribute as usize]
    }

    pub(crate) fn table_mut(&mut self, attribute: Attribute) -> &mut AttributeTable {
        &mut self.tables[attribute as usize]
    }

    pub fn tables(&self) -> impl Iterator<Item = &AttributeTable> {
        self.tables.iter()
    }

    /// Identifiers of catalogued works
    pub fn catalogued_ids(&self) -> BTreeSet<WorkId> {
        self.table(Attribute::PRESENCE).ids()
    }

    pub fn is_catalogued(&self, id: &WorkId) -> bool {
        self.table(Attribute::PRESENCE).contains(id)
    }

    /// Values of one attribute for one work
    pub fn values(&self, attribute: Attribute, id: &WorkId) -> Vec<&str> {
        self.table(attribute).values_for(id)
    }

    /// Total rows held for `id` across every table
    pub fn row_count(&self, id: &WorkId) -> usize {
        self.tables
            .iter()
            .map(|table| table.values_for(id).len())
            .sum()
    }

    /// Works whose rows break the catalog invariant
    ///
    /// A catalogued work must have exactly one row in each single-valued
    /// table and at least one row in each multi-valued table. Rows of a work
    /// missing from the presence table are orphans and count as well.
    pub fn inconsistent_works(&self) -> BTreeSet<WorkId> {
        let mut counts: BTreeMap<Attribute, BTreeMap<&WorkId, usize>> = BTreeMap::new();
        for table in &self.tables {
            let per_id = counts.entry(table.attribute()).or_default();
            for row in table.rows() {
                *per_id.entry(&row.id).or_default() += 1;
            }
        }

        let catalogued = self.catalogued_ids();
        let orphans = self
            .tables
            .iter()
            .flat_map(|table| table.rows())
            .filter(|row| !catalogued.contains(&row.id))
            .map(|row| row.id.clone());

        catalogued
            .iter()
            .filter(|id| {
                Attribute::ALL.into_iter().any(|attribute| {
                    let n = counts
                        .get(&attribute)
                        .and_then(|per_id| per_id.get(id))
                        .copied()
                        .unwrap_or(0);
                    if attribute.is_multi_valued() {
                        n == 0
                    } else {
                        n != 1
                    }
                })
            })
            .cloned()
            .chain(orphans)
            .collect()
    }

    /// Number of catalogued works
    pub fn len(&self) -> usize {
        self.catalogued_ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table(Attribute::PRESENCE).is_empty()
    }
}
