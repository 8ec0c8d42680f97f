//! The simulated vehicle.
//!
//! A vehicle's identity (VIN and type) is fixed at creation. Its speed and
//! gear only change through the shift engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A car with a fixed identity and a mutable drive state.
///
/// # Example
///
/// ```rust
/// use gearshift::core::Vehicle;
///
/// let car = Vehicle::new("toyota", "1234yes");
/// assert_eq!(car.current_speed(), 0);
/// assert_eq!(car.current_gear(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    vin: String,
    car_type: String,
    current_speed: u32,
    current_gear: usize,
}

impl Vehicle {
    /// Create a vehicle at rest in gear 0.
    pub fn new(car_type: impl Into<String>, vin: impl Into<String>) -> Self {
        Self {
            vin: vin.into(),
            car_type: car_type.into(),
            current_speed: 0,
            current_gear: 0,
        }
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }

    pub fn car_type(&self) -> &str {
        &self.car_type
    }

    pub fn current_speed(&self) -> u32 {
        self.current_speed
    }

    pub fn current_gear(&self) -> usize {
        self.current_gear
    }

    /// Place the vehicle in `gear` travelling at `speed`.
    pub(crate) fn settle(&mut self, speed: u32, gear: usize) {
        self.current_speed = speed;
        self.current_gear = gear;
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Car vin: {} type: {} speed: {} gear: {}",
            self.vin, self.car_type, self.current_speed, self.current_gear
        )
    }
}
