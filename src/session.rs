//! A simulation session: gear table, fleet, engine and recorder together.
//!
//! The session validates every request before the shift engine sees it, so
//! the engine only ever receives upshift targets taken from the table.

use crate::core::{validate_gear_selection, GearTable, SelectionError, Vehicle};
use crate::engine::{ShiftEngine, ShiftReport};
use crate::fleet::{Fleet, FleetError};
use crate::recorder::{EventRecorder, EventSink, StorageError};
use rand::Rng;
use stillwater::validation::Validation;
use thiserror::Error;
use tracing::info;

/// Errors returned by session operations.
///
/// Everything except [`SessionError::Storage`] is recoverable: the request is
/// rejected and the session is unchanged.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("{}", join_errors(.0))]
    InvalidGear(Vec<SelectionError>),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn join_errors(errors: &[SelectionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub struct Session<R: Rng, S: EventSink> {
    table: GearTable,
    fleet: Fleet,
    engine: ShiftEngine<R>,
    recorder: EventRecorder<S>,
}

impl<R: Rng, S: EventSink> Session<R, S> {
    /// Start a session with an empty fleet.
    pub fn new(table: GearTable, engine: ShiftEngine<R>, recorder: EventRecorder<S>) -> Self {
        Self {
            table,
            fleet: Fleet::new(),
            engine,
            recorder,
        }
    }

    pub fn table(&self) -> &GearTable {
        &self.table
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn recorder(&self) -> &EventRecorder<S> {
        &self.recorder
    }

    pub fn create_car(&mut self, car_type: &str, vin: &str) -> Result<&Vehicle, SessionError> {
        Ok(self.fleet.create(car_type, vin)?)
    }

    /// Look up a car by index, reporting out-of-range indices.
    pub fn select_car(&self, index: usize) -> Result<&Vehicle, SessionError> {
        let car = self
            .fleet
            .get(index)
            .ok_or(SelectionError::CarNotFound {
                index,
                available: self.fleet.len(),
            })?;
        info!("Car chosen: {}", car.vin());
        Ok(car)
    }

    /// Shift car `car_index` up to gear `gear_index`.
    pub fn change_gears(
        &mut self,
        car_index: usize,
        gear_index: usize,
    ) -> Result<ShiftReport, SessionError> {
        let available = self.fleet.len();
        let vehicle = self
            .fleet
            .get_mut(car_index)
            .ok_or(SelectionError::CarNotFound {
                index: car_index,
                available,
            })?;

        let target = match validate_gear_selection(&self.table, vehicle, gear_index) {
            Validation::Success(gear) => gear,
            Validation::Failure(errors) => {
                return Err(SessionError::InvalidGear(errors.iter().cloned().collect()))
            }
        };

        Ok(self
            .engine
            .shift(vehicle, &target, &self.table, &mut self.recorder)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::seeded_rng;
    use crate::engine::SimRng;
    use crate::core::ShiftEvent;
    use crate::recorder::MemoryEventLog;
    use std::io;
    use tracing::Dispatch;

    struct FullDisk;

    impl EventSink for FullDisk {
        fn append(&mut self, _event: &ShiftEvent) -> Result<(), StorageError> {
            Err(StorageError::Flush(io::Error::new(
                io::ErrorKind::Other,
                "disk full",
            )))
        }
    }

    fn session() -> Session<SimRng, MemoryEventLog> {
        let table = GearTable::from_bands([(0, 10), (11, 20), (21, 30), (31, 40)]).unwrap();
        let mut session = Session::new(
            table,
            ShiftEngine::new(seeded_rng(Some(11))),
            EventRecorder::new(MemoryEventLog::new(), Dispatch::none()),
        );
        session.create_car("toyota", "1234yes").unwrap();
        session
    }

    #[test]
    fn change_gears_shifts_selected_car() {
        let mut session = session();

        let report = session.change_gears(0, 3).unwrap();

        assert_eq!(report.to_gear, 3);
        assert_eq!(session.fleet().get(0).unwrap().current_gear(), 3);
        assert_eq!(session.recorder().sink().len(), 3);
    }

    #[test]
    fn unknown_car_is_recoverable() {
        let mut session = session();

        let err = session.change_gears(5, 1).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Selection(SelectionError::CarNotFound {
                index: 5,
                available: 1
            })
        ));
        assert!(session.select_car(5).is_err());
    }

    #[test]
    fn current_gear_is_rejected_without_recording() {
        let mut session = session();
        session.change_gears(0, 2).unwrap();
        let recorded = session.recorder().sink().len();

        let err = session.change_gears(0, 2).unwrap_err();
        assert!(matches!(err, SessionError::InvalidGear(ref errors)
            if errors == &[SelectionError::SameGear { index: 2 }]));
        assert_eq!(session.recorder().sink().len(), recorded);
    }

    #[test]
    fn downshift_is_rejected() {
        let mut session = session();
        session.change_gears(0, 3).unwrap();

        let err = session.change_gears(0, 1).unwrap_err();
        assert!(matches!(err, SessionError::InvalidGear(_)));
        assert!(err.to_string().contains("downshift"));
        assert_eq!(session.fleet().get(0).unwrap().current_gear(), 3);
    }

    #[test]
    fn duplicate_car_is_rejected() {
        let mut session = session();

        let err = session.create_car("honda", "1234yes").unwrap_err();
        assert!(matches!(err, SessionError::Fleet(FleetError::DuplicateVin { .. })));
        assert_eq!(session.fleet().len(), 1);
    }

    #[test]
    fn event_log_failure_is_propagated() {
        let table = GearTable::from_bands([(0, 10), (11, 20), (21, 30)]).unwrap();
        let mut session = Session::new(
            table,
            ShiftEngine::new(seeded_rng(Some(11))),
            EventRecorder::new(FullDisk, Dispatch::none()),
        );
        session.create_car("toyota", "1234yes").unwrap();

        let err = session.change_gears(0, 2).unwrap_err();

        assert!(matches!(err, SessionError::Storage(StorageError::Flush(_))));
        assert!(err.to_string().contains("disk full"));
        assert_eq!(session.fleet().get(0).unwrap().current_gear(), 0);
    }
}
