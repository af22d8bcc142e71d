//! Configuration module
//!
//! Defaults for both commands can be kept in a TOML file:
//!
//! ```toml
//! [split]
//! lines_per_chunk = 5000
//! header = "from_source"
//! index_format = "06d"
//! encoding = "utf-8"
//!
//! [join]
//! persisted_header = true
//! ignore_missing_chunks = false
//! ```
//!
//! Command-line flags take precedence over the file.

use crate::error::CliError;
use anyhow::{Context, Result};
use bite_engine::{JoinOptions, SplitOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Defaults for `bite split`
    #[serde(default)]
    pub split: SplitOptions,

    /// Defaults for `bite join`
    #[serde(default)]
    pub join: JoinOptions,
}

impl CliConfig {
    /// Load the configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse the configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CliError::ConfigError(e.message().to_string()).into())
    }
}
