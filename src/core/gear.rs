//! Gear definitions and the ordered gear table.
//!
//! A gear table is built once from the `gears` configuration section and is
//! immutable afterwards. Entry indices always equal their position.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

/// Prefix of the sequential configuration keys (`gear_1`, `gear_2`, ...).
pub const GEAR_KEY_PREFIX: &str = "gear_";

/// A single gear and its inclusive speed band.
///
/// # Example
///
/// ```rust
/// use gearshift::core::GearEntry;
///
/// let gear = GearEntry::new(2, 21, 30);
/// assert!(gear.contains(25));
/// assert!(!gear.contains(31));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearEntry {
    /// Zero-based position in the table
    pub index: usize,
    /// Lowest speed of the band
    pub low_speed: u32,
    /// Highest speed of the band
    pub high_speed: u32,
}

impl GearEntry {
    pub fn new(index: usize, low_speed: u32, high_speed: u32) -> Self {
        Self {
            index,
            low_speed,
            high_speed,
        }
    }

    /// The inclusive speed band of this gear.
    pub fn band(&self) -> RangeInclusive<u32> {
        self.low_speed..=self.high_speed
    }

    /// Check whether `speed` lies inside the band.
    pub fn contains(&self, speed: u32) -> bool {
        self.band().contains(&speed)
    }
}

impl fmt::Display for GearEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} - {}", self.index, self.low_speed, self.high_speed)
    }
}

/// Ordered, contiguous sequence of gear entries.
///
/// # Example
///
/// ```rust
/// use gearshift::core::GearTable;
/// use std::collections::HashMap;
///
/// let mut section = HashMap::new();
/// section.insert("gear_1".to_string(), "0, 10".to_string());
/// section.insert("gear_2".to_string(), "11,20".to_string());
///
/// let table = GearTable::from_section(&section).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(1).unwrap().low_speed, 11);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GearTable {
    entries: Vec<GearEntry>,
}

impl GearTable {
    /// Build a table from `(low, high)` bands, assigning indices by position.
    pub fn from_bands<I>(bands: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let mut entries = Vec::new();
        for (index, (low, high)) in bands.into_iter().enumerate() {
            if high < low {
                return Err(ConfigError::InvertedBand {
                    key: gear_key(index),
                    low,
                    high,
                });
            }
            entries.push(GearEntry::new(index, low, high));
        }
        Ok(Self { entries })
    }

    /// Load the table from a `gears` section.
    ///
    /// Keys are read in order starting at `gear_1` and enumeration stops at
    /// the first missing key, so a section without `gear_1` yields an empty
    /// table. Malformed values are returned as errors, never skipped.
    pub fn from_section(section: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut bands = Vec::new();
        let mut key = gear_key(0);
        while let Some(value) = section.get(&key) {
            bands.push(parse_band(&key, value)?);
            key = gear_key(bands.len());
        }
        Self::from_bands(bands)
    }

    pub fn get(&self, index: usize) -> Option<&GearEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GearEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a GearTable {
    type Item = &'a GearEntry;
    type IntoIter = std::slice::Iter<'a, GearEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Configuration key of the entry at `index` (`gear_1` for index 0).
fn gear_key(index: usize) -> String {
    format!("{GEAR_KEY_PREFIX}{}", index + 1)
}

fn parse_band(key: &str, value: &str) -> Result<(u32, u32), ConfigError> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    let [low, high] = fields.as_slice() else {
        return Err(ConfigError::MalformedGear {
            key: key.to_string(),
            value: value.to_string(),
        });
    };

    let parse = |raw: &str| {
        raw.parse::<u32>().map_err(|source| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: value.to_string(),
            source,
        })
    };

    Ok((parse(*low)?, parse(*high)?))
}
