//! Configuration loading
//!
//! Handles parsing of the optional `config.toml` file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::{DEFAULT_APPLICATION, DEFAULT_SEARCH_LIMIT};
use crate::transport::DEFAULT_OSASCRIPT;

const CONFIG_FILENAME: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application the generated scripts talk to
    #[serde(default = "default_application")]
    pub application: String,

    /// Program used to run scripts
    #[serde(default = "default_osascript")]
    pub osascript: PathBuf,

    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application: default_application(),
            osascript: default_osascript(),
            search: SearchConfig::default(),
        }
    }
}

fn default_application() -> String {
    DEFAULT_APPLICATION.to_string()
}

fn default_osascript() -> PathBuf {
    PathBuf::from(DEFAULT_OSASCRIPT)
}

/// Search-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result cap when `--limit` is not given
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path` if it exists, or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// `<user config dir>/things/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "things")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// An explicitly requested file must load cleanly; the default location
    /// falls back to defaults.
    pub fn resolve(explicit: Option<&Path>) -> crate::error::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::default_path()
                .map(|path| Self::load_or_default(&path))
                .unwrap_or_default()),
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.application.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "application cannot be empty".to_string(),
            ));
        }
        if self.osascript.as_os_str().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "osascript cannot be empty".to_string(),
            ));
        }
        if self.search.default_limit == 0 {
            return Err(crate::error::Error::InvalidConfig(
                "search.default_limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
