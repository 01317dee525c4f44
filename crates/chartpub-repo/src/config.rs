//! Publish configuration
//!
//! Stored by default in `~/.config/chartpub/config.yaml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RepoError, Result};
use crate::index::{Overrides, is_reserved};

/// The only configuration schema this crate understands
pub const CONFIG_API_VERSION: &str = "chartpub.io/v1";

/// Publish configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishConfig {
    /// API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Prefix for absolute download URLs; blank means relative URLs
    #[serde(default)]
    pub base_url: Option<String>,

    /// Index file to merge into
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,

    /// Chart manifest to read
    #[serde(default = "default_manifest_file")]
    pub manifest_file: PathBuf,

    /// Extra fields added to every index entry
    #[serde(default)]
    pub overrides: Overrides,
}

fn default_api_version() -> String {
    CONFIG_API_VERSION.to_string()
}

fn default_index_file() -> PathBuf {
    PathBuf::from("index.yaml")
}

fn default_manifest_file() -> PathBuf {
    PathBuf::from("Chart.yaml")
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            base_url: None,
            index_file: default_index_file(),
            manifest_file: default_manifest_file(),
            overrides: Overrides::new(),
        }
    }
}

impl PublishConfig {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RepoError::io(path, e))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| RepoError::InvalidConfig {
            message: format!("{}: {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RepoError::io(parent, e))?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| RepoError::io(path, e))
    }

    /// Get default configuration path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| RepoError::InvalidConfig {
            message: "Could not determine config directory".to_string(),
        })?;
        Ok(config_dir.join("chartpub").join("config.yaml"))
    }

    /// Base URL with blank values treated as unset
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    fn validate(&self) -> Result<()> {
        if self.api_version != CONFIG_API_VERSION {
            return Err(RepoError::InvalidConfig {
                message: format!(
                    "unsupported apiVersion '{}', expected {}",
                    self.api_version, CONFIG_API_VERSION
                ),
            });
        }
        if let Some(key) = self.overrides.keys().find(|k| is_reserved(k)) {
            return Err(RepoError::InvalidConfig {
                message: format!("override '{}' targets a field computed by the index", key),
            });
        }
        Ok(())
    }
}
