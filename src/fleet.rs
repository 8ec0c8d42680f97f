//! The list of simulated vehicles.

use crate::core::Vehicle;
use thiserror::Error;
use tracing::info;

/// Errors raised when adding a vehicle
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FleetError {
    #[error("VIN must not be empty")]
    EmptyVin,

    #[error("A car with VIN {vin} already exists")]
    DuplicateVin { vin: String },
}

/// Process-wide list of vehicles, addressed by zero-based index.
///
/// Vehicles are never removed, so an index stays valid for the whole run.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new vehicle at rest in gear 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gearshift::fleet::Fleet;
    ///
    /// let mut fleet = Fleet::new();
    /// fleet.create("toyota", "1234yes").unwrap();
    ///
    /// assert_eq!(fleet.len(), 1);
    /// assert!(fleet.get(0).is_some());
    /// assert!(fleet.get(1).is_none());
    /// assert!(fleet.create("honda", "1234yes").is_err());
    /// ```
    pub fn create(&mut self, car_type: &str, vin: &str) -> Result<&Vehicle, FleetError> {
        if vin.is_empty() {
            return Err(FleetError::EmptyVin);
        }
        if self.vehicles.iter().any(|car| car.vin() == vin) {
            return Err(FleetError::DuplicateVin {
                vin: vin.to_string(),
            });
        }

        info!("Created new Car: {} - {}", vin, car_type);
        self.vehicles.push(Vehicle::new(car_type, vin));
        Ok(&self.vehicles[self.vehicles.len() - 1])
    }

    /// Look up a vehicle; out-of-range indices yield `None`.
    pub fn get(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
