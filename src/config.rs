//! Engine configuration.
//!
//! Configuration is read from TOML. Every key is optional and falls back to
//! its default:
//!
//! ```toml
//! default_sort_mode = "smart"
//! default_status_filter = "all"
//! log_level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::task::domain::{SortMode, StatusFilter};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Resolved engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Sort mode of a fresh or cleared task store.
    pub default_sort_mode: SortMode,
    /// Status filter of a fresh or cleared task store.
    pub default_status_filter: StatusFilter,
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_sort_mode: SortMode::Smart,
            default_status_filter: StatusFilter::All,
            log_level: "info".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed TOML or unknown
    /// enum values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] if the file cannot be read, or
    /// [`ConfigError::ParseToml`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
