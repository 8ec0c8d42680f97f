//! Validation of user selections before a shift is attempted.
//!
//! The shift engine only accepts pre-validated targets. Gear selection is
//! checked with `Validation` so every violated rule is reported together
//! instead of failing on the first one.

use super::gear::{GearEntry, GearTable};
use super::vehicle::Vehicle;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Reasons a car or gear selection is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid selection: {input:?} is not an index")]
    NotAnIndex { input: String },

    #[error("Invalid selection: {input}")]
    UnknownMenuChoice { input: String },

    #[error("Invalid car selection: {index} (fleet has {available} cars)")]
    CarNotFound { index: usize, available: usize },

    #[error("Invalid gear selection: {index} (table has {available} gears)")]
    UnknownGear { index: usize, available: usize },

    #[error("Invalid gear change: already in gear {index}")]
    SameGear { index: usize },

    #[error("Invalid gear change: downshift from {current} to {index} is not supported")]
    Downshift { current: usize, index: usize },
}

/// Outcome of validating a target gear.
pub type GearSelection = Validation<GearEntry, NonEmptyVec<SelectionError>>;

/// Parse a zero-based index typed by the user.
pub fn parse_index(input: &str) -> Result<usize, SelectionError> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| SelectionError::NotAnIndex {
            input: input.to_string(),
        })
}

/// Validate `index` as a shift target for `vehicle`, accumulating all violations.
///
/// A valid target exists in the table and lies strictly above the vehicle's
/// current gear.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{validate_gear_selection, GearTable, Vehicle};
///
/// let table = GearTable::from_bands([(0, 10), (11, 20), (21, 30)]).unwrap();
/// let car = Vehicle::new("toyota", "1234yes");
///
/// assert!(validate_gear_selection(&table, &car, 2).is_success());
/// assert!(validate_gear_selection(&table, &car, 0).is_failure());
/// assert!(validate_gear_selection(&table, &car, 7).is_failure());
/// ```
pub fn validate_gear_selection(table: &GearTable, vehicle: &Vehicle, index: usize) -> GearSelection {
    let current = vehicle.current_gear();
    let mut checks: Vec<Validation<(), NonEmptyVec<SelectionError>>> = Vec::new();

    checks.push(if index < table.len() {
        Validation::success(())
    } else {
        Validation::fail(SelectionError::UnknownGear {
            index,
            available: table.len(),
        })
    });

    checks.push(if index == current {
        Validation::fail(SelectionError::SameGear { index })
    } else {
        Validation::success(())
    });

    checks.push(if index < current {
        Validation::fail(SelectionError::Downshift { current, index })
    } else {
        Validation::success(())
    });

    match (Validation::all_vec(checks), table.get(index)) {
        (Validation::Success(_), Some(gear)) => Validation::success(*gear),
        (Validation::Failure(errors), _) => Validation::Failure(errors),
        (Validation::Success(_), None) => Validation::fail(SelectionError::UnknownGear {
            index,
            available: table.len(),
        }),
    }
}
