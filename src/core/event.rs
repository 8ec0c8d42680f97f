//! Shift event records.
//!
//! One event is written for every gear boundary a shift crosses. Events are
//! immutable values; field order matches the persisted row layout.

use super::vehicle::Vehicle;
use serde::{Deserialize, Serialize};

/// Record of a single step of a multi-step shift.
///
/// `speed_before` and `gear_before` describe the vehicle before the step was
/// applied; `gear_target_step` is the table position the step passed through.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{ShiftEvent, Vehicle};
///
/// let car = Vehicle::new("toyota", "1234yes");
/// let event = ShiftEvent::from_snapshot(&car, 4, 0, 1_700_000_000);
///
/// assert_eq!(event.vin, "1234yes");
/// assert_eq!(event.gear_before, 0);
/// assert_eq!(event.speed_change, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftEvent {
    /// Seconds since the Unix epoch (UTC) at write time
    pub timestamp: i64,
    pub vin: String,
    pub car_type: String,
    pub speed_before: u32,
    pub gear_before: usize,
    /// Random speed change drawn for the step (logged only)
    pub speed_change: u32,
    pub gear_target_step: usize,
}

impl ShiftEvent {
    /// Build an event from the vehicle's state before the step mutates it.
    pub fn from_snapshot(
        vehicle: &Vehicle,
        speed_change: u32,
        gear_target_step: usize,
        timestamp: i64,
    ) -> Self {
        Self {
            timestamp,
            vin: vehicle.vin().to_string(),
            car_type: vehicle.car_type().to_string(),
            speed_before: vehicle.current_speed(),
            gear_before: vehicle.current_gear(),
            speed_change,
            gear_target_step,
        }
    }
}
