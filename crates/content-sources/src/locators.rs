// FILE: crates/content-sources/src/locators.rs

use crate::{SourceError, SourceResult};
use dlshelf_core::WorkId;
use std::collections::BTreeMap;

const PLACEHOLDER: &str = "{id}";

/// Remote page locator templates keyed by identifier prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorTemplates {
    templates: BTreeMap<String, String>,
}

impl LocatorTemplates {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn with_template(mut self, prefix: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(prefix.into(), template.into());
        self
    }

    /// Locator for `id`, chosen by its prefix family
    pub fn locator(&self, id: &WorkId) -> SourceResult<String> {
        self.templates
            .get(id.prefix())
            .map(|template| template.replace(PLACEHOLDER, id.as_str()))
            .ok_or_else(|| SourceError::UnsupportedPrefix(id.prefix().to_string()))
    }
}
