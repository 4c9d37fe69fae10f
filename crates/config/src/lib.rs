// FILE: crates/config/src/lib.rs

//! dlshelf configuration
//!
//! One TOML file describes where the catalog lives, which identifier
//! families are recognized and how remote pages are fetched. Loading is
//! strict: a missing file, malformed TOML or any invalid value is a
//! [`ConfigError`] and no sync run starts.
//!
//! # Example
//!
//! ```rust
//! use dlshelf_config::Config;
//!
//! let config = Config::from_toml_str(r#"
//!     images_path = "images"
//!     library_indexed_info_path = "library"
//! "#).unwrap();
//! assert_eq!(config.recognized_prefixes, vec!["RJ", "VJ"]);
//! assert!(config.locator_template("RJ").is_some());
//! ```

mod error;
mod fetch_config;
mod loader;
mod validation;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use fetch_config::FetchConfig;
pub use loader::{load_library_directories, ConfigLoader};
pub use validation::{ConfigSection, Validator};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the work identifier in locator templates
pub const ID_PLACEHOLDER: &str = "{id}";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding one cover image per work
    pub images_path: PathBuf,

    /// Directory holding one JSON file per catalog attribute
    pub library_indexed_info_path: PathBuf,

    /// JSON array of library root directories to scan
    pub library_directories_file: PathBuf,

    /// Identifier families recognized in folder names
    pub recognized_prefixes: Vec<String>,

    /// Remote fetch settings
    pub fetch: FetchConfig,

    /// Remote page locator template per identifier prefix
    pub locators: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_path: PathBuf::from("images"),
            library_indexed_info_path: PathBuf::from("library"),
            library_directories_file: PathBuf::from("library_directories.json"),
            recognized_prefixes: vec!["RJ".to_string(), "VJ".to_string()],
            fetch: FetchConfig::default(),
            locators: default_locators(),
        }
    }
}

fn default_locators() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "RJ".to_string(),
            "https://www.dlsite.com/maniax/work/=/product_id/{id}.html/?locale=en_US".to_string(),
        ),
        (
            "VJ".to_string(),
            "https://www.dlsite.com/soft/work/=/product_id/{id}.html/?locale=en_US".to_string(),
        ),
    ])
}

impl Config {
    /// Parses and validates configuration from TOML text
    ///
    /// Relative paths are left as written; see [`Config::resolve_paths`].
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Config = toml::from_str(contents).map_err(|e| ConfigError::ParseError {
            path: PathBuf::from("<string>"),
            source: e,
        })?;
        config
            .validate()
            .map_err(|errors| ConfigError::from_validation(&errors))?;
        Ok(config)
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.recognized_prefixes.is_empty() {
            errors.push(ValidationError::new(
                "recognized_prefixes",
                "must list at least one prefix",
            ));
        }

        for (i, prefix) in self.recognized_prefixes.iter().enumerate() {
            let field = format!("recognized_prefixes[{}]", i);
            if let Err(e) = Validator::ascii_letters(prefix, &field) {
                errors.push(e);
                continue;
            }
            match self.locator_template(prefix) {
                Some(template) => {
                    let field = format!("locators.{}", prefix);
                    if let Err(e) = Validator::contains_placeholder(template, ID_PLACEHOLDER, &field)
                    {
                        errors.push(e);
                    }
                }
                None => errors.push(ValidationError::with_value(
                    "locators",
                    "missing template for recognized prefix",
                    prefix,
                )),
            }
        }

        for (field, path) in [
            ("images_path", &self.images_path),
            ("library_indexed_info_path", &self.library_indexed_info_path),
            ("library_directories_file", &self.library_directories_file),
        ] {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new(field, "must not be empty"));
            }
        }

        if let Err(e) = self.fetch.validate() {
            let section = self.fetch.section_name();
            errors.extend(e.into_iter().map(|e| e.in_section(section)));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Makes every relative path absolute against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.images_path,
            &mut self.library_indexed_info_path,
            &mut self.library_directories_file,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Locator template for an identifier prefix
    pub fn locator_template(&self, prefix: &str) -> Option<&str> {
        self.locators.get(prefix).map(String::as_str)
    }
}
