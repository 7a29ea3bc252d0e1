//! Configuration loading and management
//!
//! Handles parsing of `.taskrepo.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::DEFAULT_DATA_FILE;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = ".taskrepo.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Listing configuration
    #[serde(default)]
    pub list: ListConfig,
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Snapshot file; relative paths resolve against the config directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Pretty-print the JSON snapshot
    #[serde(default)]
    pub pretty: bool,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            pretty: false,
        }
    }
}

/// Listing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListConfig {
    /// Page size used when `--limit` is omitted (0 disables paging)
    #[serde(default)]
    pub default_limit: i64,
}

impl Config {
    /// Load configuration from a `.taskrepo.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            match Self::load(&config_path) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(
                        path = %config_path.display(),
                        error = %err,
                        "ignoring invalid config"
                    );
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Resolve the snapshot path against `base_dir`
    pub fn data_path(&self, base_dir: &Path) -> PathBuf {
        let data_file = Path::new(self.storage.data_file.trim());
        if data_file.is_absolute() {
            data_file.to_path_buf()
        } else {
            base_dir.join(data_file)
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.storage.data_file.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "storage.data_file cannot be empty".to_string(),
            ));
        }
        if self.list.default_limit < 0 {
            return Err(crate::error::Error::InvalidConfig(
                "list.default_limit must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}
