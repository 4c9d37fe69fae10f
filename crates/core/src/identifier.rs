// FILE: crates/core/src/identifier.rs

//! Work identifier recognition in folder names

use crate::error::{CoreError, CoreResult};
use crate::types::WorkId;
use regex::Regex;

/// Prefix families recognized when none are configured
pub const DEFAULT_PREFIXES: &[&str] = &["RJ", "VJ"];

/// Recognizes bracketed identifier tags such as `[RJ123456]` in folder names
///
/// Only tags whose prefix belongs to the configured set are recognized; the
/// returned identifier is the bracket contents.
#[derive(Debug, Clone)]
pub struct IdentifierExtractor {
    prefixes: Vec<String>,
    pattern: Regex,
}

impl IdentifierExtractor {
    pub fn new<I, S>(prefixes: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes.into_iter().map(Into::into).collect();
        if prefixes.is_empty() {
            return Err(CoreError::NoPrefixes);
        }

        for prefix in &prefixes {
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(CoreError::InvalidPrefix(prefix.clone()));
            }
        }

        let alternatives = prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(r"\[((?:{})[0-9]+)\]", alternatives))
            .map_err(|_| CoreError::InvalidPrefix(alternatives.clone()))?;

        Ok(Self { prefixes, pattern })
    }

    /// Returns the identifier encoded in `folder_name`, if any
    ///
    /// The first recognized tag wins when a name carries several.
    pub fn extract(&self, folder_name: &str) -> Option<WorkId> {
        let captures = self.pattern.captures(folder_name)?;
        WorkId::parse(captures.get(1)?.as_str()).ok()
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}
