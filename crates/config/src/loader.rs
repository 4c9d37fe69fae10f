// FILE: crates/config/src/loader.rs

//! Reading configuration and the library directory list from disk

use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads the configuration file at a fixed path
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Loads, resolves and validates the configuration
    ///
    /// Relative paths are resolved against the config file's directory.
    pub fn load(&self) -> ConfigResult<Config> {
        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        // An empty file is treated as corrupted, not as defaults
        if contents.trim().is_empty() {
            return Err(ConfigError::ReadError {
                path: self.config_path.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Config file is empty or contains only whitespace",
                ),
            });
        }

        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: self.config_path.clone(),
                source: e,
            })?;

        config
            .validate()
            .map_err(|errors| ConfigError::from_validation(&errors))?;

        let base = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.resolve_paths(&base);

        log::info!("Loaded config from {}", self.config_path.display());
        Ok(config)
    }
}

/// Reads the JSON array of library root directories
///
/// Relative entries are resolved against the list file's directory.
pub fn load_library_directories(path: &Path) -> ConfigResult<Vec<PathBuf>> {
    let contents =
        fs::read_to_string(path).map_err(|e| ConfigError::DirectoryListReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let entries: Vec<PathBuf> =
        serde_json::from_str(&contents).map_err(|e| ConfigError::DirectoryListParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let roots = entries
        .into_iter()
        .map(|entry| {
            if entry.is_relative() {
                base.join(entry)
            } else {
                entry
            }
        })
        .collect::<Vec<_>>();

    log::debug!("{} library root(s) listed in {}", roots.len(), path.display());
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        (temp_dir, config_path)
    }

    #[test]
    fn test_missing_config_is_error() {
        let (_temp_dir, config_path) = setup_test_dir();
        let result = ConfigLoader::new(config_path).load();
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_empty_config_is_error() {
        let (_temp_dir, config_path) = setup_test_dir();
        fs::write(&config_path, "  \n").unwrap();
        assert!(ConfigLoader::new(config_path).load().is_err());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let (_temp_dir, config_path) = setup_test_dir();
        fs::write(&config_path, "images_path = [").unwrap();
        let result = ConfigLoader::new(config_path).load();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let (temp_dir, config_path) = setup_test_dir();
        fs::write(&config_path, "images_path = \"covers\"\n").unwrap();

        let config = ConfigLoader::new(&config_path).load().unwrap();
        assert_eq!(config.images_path, temp_dir.path().join("covers"));
    }

    #[test]
    fn test_directory_list() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("dirs.json");
        fs::write(&list, r#"["/mnt/voice", "local"]"#).unwrap();

        let roots = load_library_directories(&list).unwrap();
        assert_eq!(
            roots,
            vec![PathBuf::from("/mnt/voice"), temp_dir.path().join("local")]
        );
    }

    #[test]
    fn test_directory_list_errors() {
        let temp_dir = TempDir::new().unwrap();
        let list = temp_dir.path().join("dirs.json");

        assert!(matches!(
            load_library_directories(&list),
            Err(ConfigError::DirectoryListReadError { .. })
        ));

        fs::write(&list, r#"{"not": "an array"}"#).unwrap();
        assert!(matches!(
            load_library_directories(&list),
            Err(ConfigError::DirectoryListParseError { .. })
        ));
    }
}
