//! Configuration loading, from an `index.toml` file:
//!
//! ```toml
//! [lookup]
//! domain = "demo"
//! deleted_ok = false
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Settings for [`crate::CaseAccess`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Domain cases must belong to. `None` accepts any domain.
    pub domain: Option<String>,
    /// Whether soft-deleted cases may be returned.
    pub deleted_ok: bool,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub lookup: LookupConfig,
}

impl IndexConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads and parses a configuration file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads configuration from `path` if it exists.
    /// Falls back to defaults with a warning on read or parse errors.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No index config found at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                info!("Loaded index config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("Failed to load index config {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}
