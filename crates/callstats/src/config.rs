//! Configuration management for callstats.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::CAPACITY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "callstats";

/// Default export file name.
pub const EXPORT_FILE_NAME: &str = "weekly_call_info.txt";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CALLSTATS_`)
/// 2. TOML config file at `~/.config/callstats/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Store configuration.
    pub store: StoreConfig,
    /// Export configuration.
    pub export: ExportConfig,
}

/// What a bulk load does when the source holds more records than fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Append what fits and skip the rest with a warning.
    #[default]
    Truncate,
    /// Append nothing and fail the load.
    Reject,
}

/// Store-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of call records held at once.
    pub capacity: usize,
    /// Bulk load behavior past capacity.
    pub overflow: OverflowPolicy,
}

/// Export-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output file written by the export operation.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: CAPACITY,
            overflow: OverflowPolicy::Truncate,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(EXPORT_FILE_NAME),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("CALLSTATS_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.capacity == 0 {
            return Err(Error::ConfigValidation {
                message: "store.capacity must be greater than 0".to_string(),
            });
        }

        if self.export.path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "export.path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the export file path.
    #[must_use]
    pub fn export_path(&self) -> &Path {
        &self.export.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.store.capacity, 20);
        assert_eq!(config.store.overflow, OverflowPolicy::Truncate);
        assert_eq!(config.export_path(), Path::new("weekly_call_info.txt"));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_capacity() {
        let mut config = Config::default();
        config.store.capacity = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("store.capacity"));
    }

    #[test]
    fn test_validate_empty_export_path() {
        let mut config = Config::default();
        config.export.path = PathBuf::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("export.path"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("callstats"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[store]\ncapacity = 5\noverflow = \"reject\"\n\n[export]\npath = \"out.txt\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.store.capacity, 5);
        assert_eq!(config.store.overflow, OverflowPolicy::Reject);
        assert_eq!(config.export_path(), Path::new("out.txt"));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\ncapacity = 0\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_overflow_policy_serialize() {
        let json = serde_json::to_string(&OverflowPolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
    }

    #[test]
    fn test_store_config_deserialize() {
        let json = r#"{"capacity": 50}"#;
        let store: StoreConfig = serde_json::from_str(json).unwrap();
        assert_eq!(store.capacity, 50);
        assert_eq!(store.overflow, OverflowPolicy::Truncate);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        assert_eq!(config.clone(), config);
    }
}
