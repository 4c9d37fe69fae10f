// FILE: crates/core/src/types/record.rs

//! Raw fetched records and their normalized form

use crate::types::{Attribute, AttributeValue, WorkId};
use std::collections::BTreeMap;

/// Unnormalized fields extracted from one remote catalog page
///
/// Text is kept as found on the page. Multi-valued fields such as `author`
/// still use the page's `"A / B"` encoding; the normalizer splits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWorkRecord {
    pub id: WorkId,
    pub age: Option<String>,
    pub author: Option<String>,
    pub circle: Option<String>,
    pub illustration: Option<String>,
    pub product_format: Option<String>,
    pub release_date: Option<String>,
    pub scenario: Option<String>,
    pub series: Option<String>,
    pub tags: Vec<String>,
    pub title: Option<String>,
    pub voice_actor: Option<String>,
}

impl RawWorkRecord {
    pub fn new(id: WorkId) -> Self {
        Self {
            id,
            age: None,
            author: None,
            circle: None,
            illustration: None,
            product_format: None,
            release_date: None,
            scenario: None,
            series: None,
            tags: Vec::new(),
            title: None,
            voice_actor: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One work in the catalog's per-attribute shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedWork {
    pub id: WorkId,
    pub values: BTreeMap<Attribute, AttributeValue>,
}

impl NormalizedWork {
    pub fn new(id: WorkId) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, attribute: Attribute) -> Option<&AttributeValue> {
        self.values.get(&attribute)
    }

    pub fn insert(&mut self, attribute: Attribute, value: AttributeValue) {
        self.values.insert(attribute, value);
    }
}
