//! Loading of the simulator configuration.
//!
//! The configuration file is YAML with a `gears` mapping of sequential keys:
//!
//! ```yaml
//! gears:
//!   gear_1: "0, 10"
//!   gear_2: "11, 20"
//! ```
//!
//! The file is read once at startup and turned into a [`GearTable`].

use crate::core::GearTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub mod error;

pub use error::ConfigError;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Raw configuration as read from disk.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    /// The `gears` section, keyed `gear_1`, `gear_2`, ...
    #[serde(default)]
    pub gears: HashMap<String, String>,
}

impl Settings {
    /// Read settings from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse settings from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Build the gear table from the `gears` section.
    pub fn gear_table(&self) -> Result<GearTable, ConfigError> {
        GearTable::from_section(&self.gears)
    }
}
