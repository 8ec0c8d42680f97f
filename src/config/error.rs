//! Configuration error types.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while loading the gear configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid YAML or has the wrong shape
    #[error("Failed to parse config: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// Gear value is not a `<low>,<high>` pair
    #[error("Malformed gear entry {key} = {value:?}, expected \"<low>,<high>\"")]
    MalformedGear { key: String, value: String },

    /// Gear bound is not a non-negative integer
    #[error("Invalid number in gear entry {key} = {value:?}: {source}")]
    InvalidNumber {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Gear band has its upper bound below its lower bound
    #[error("Gear entry {key} has high speed {high} below low speed {low}")]
    InvertedBand { key: String, low: u32, high: u32 },
}
