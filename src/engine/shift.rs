//! Stepwise gear-change resolution.

use crate::core::{GearEntry, GearTable, ShiftEvent, Vehicle};
use crate::recorder::{EventRecorder, EventSink, StorageError};
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

/// Range of the per-step speed change written to the event log.
pub const SPEED_CHANGE_RANGE: RangeInclusive<u32> = 1..=6;

/// Summary of a completed shift.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftReport {
    pub vin: String,
    pub from_gear: usize,
    pub to_gear: usize,
    /// One event per gear boundary crossed, in order
    pub events: Vec<ShiftEvent>,
}

impl ShiftReport {
    /// Number of gear boundaries crossed.
    pub fn steps(&self) -> usize {
        self.events.len()
    }
}

/// Moves vehicles toward a target gear one gear at a time.
///
/// The random source is injected so runs can be reproduced from a seed.
///
/// # Example
///
/// ```rust
/// use gearshift::core::{GearTable, Vehicle};
/// use gearshift::engine::ShiftEngine;
/// use gearshift::recorder::{EventRecorder, MemoryEventLog};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
/// use tracing::Dispatch;
///
/// let table = GearTable::from_bands([(0, 10), (11, 20), (21, 30)]).unwrap();
/// let mut car = Vehicle::new("toyota", "1234yes");
/// let mut recorder = EventRecorder::new(MemoryEventLog::new(), Dispatch::none());
/// let mut engine = ShiftEngine::new(ChaCha20Rng::seed_from_u64(7));
///
/// let target = *table.get(2).unwrap();
/// let report = engine.shift(&mut car, &target, &table, &mut recorder).unwrap();
///
/// assert_eq!(car.current_gear(), 2);
/// assert_eq!(report.steps(), 2);
/// assert!(table.get(1).unwrap().contains(car.current_speed()));
/// ```
pub struct ShiftEngine<R: Rng> {
    rng: R,
}

impl<R: Rng> ShiftEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Shift `vehicle` up to `target`, recording one event per step.
    ///
    /// The target must come from `table` and lie above the vehicle's current
    /// gear; callers validate this first. A target at or below the current
    /// gear leaves the vehicle untouched and records nothing.
    ///
    /// Every pass scans the table from the first entry. The entry at the
    /// vehicle's current position is traversed: its band supplies the new
    /// speed and the gear advances past it. Passes repeat until the target
    /// gear is reached.
    pub fn shift<S: EventSink>(
        &mut self,
        vehicle: &mut Vehicle,
        target: &GearEntry,
        table: &GearTable,
        recorder: &mut EventRecorder<S>,
    ) -> Result<ShiftReport, StorageError> {
        let from_gear = vehicle.current_gear();
        debug!(vin = vehicle.vin(), gear = ?table.get(from_gear), "Current gear");
        debug!(vin = vehicle.vin(), target = ?target, "Changing gears");
        info!("Car: {} switching to gear: {}", vehicle.vin(), target.index);

        let mut events = Vec::new();
        while vehicle.current_gear() < target.index {
            let before = events.len();

            for (position, gear) in table.iter().enumerate() {
                if vehicle.current_gear() == target.index {
                    break;
                }
                if vehicle.current_gear() == position {
                    events.push(self.step(vehicle, gear, recorder)?);
                }
            }

            if events.len() == before {
                warn!(
                    vin = vehicle.vin(),
                    gear = vehicle.current_gear(),
                    target = target.index,
                    "Target gear unreachable from gear table"
                );
                break;
            }
        }

        Ok(ShiftReport {
            vin: vehicle.vin().to_string(),
            from_gear,
            to_gear: vehicle.current_gear(),
            events,
        })
    }

    /// Traverse `gear`: log the step, then settle into the next gear.
    fn step<S: EventSink>(
        &mut self,
        vehicle: &mut Vehicle,
        gear: &GearEntry,
        recorder: &mut EventRecorder<S>,
    ) -> Result<ShiftEvent, StorageError> {
        let speed_change = self.rng.gen_range(SPEED_CHANGE_RANGE);
        let event = recorder.record(vehicle, speed_change, gear.index)?;

        let speed = self.rng.gen_range(gear.band());
        vehicle.settle(speed, gear.index + 1);
        debug!("\t{vehicle}");

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::MemoryEventLog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use tracing::Dispatch;

    fn six_gears() -> GearTable {
        GearTable::from_bands([(0, 10), (11, 20), (21, 30), (31, 40), (41, 50), (51, 60)])
            .unwrap()
    }

    fn recorder() -> EventRecorder<MemoryEventLog> {
        EventRecorder::new(MemoryEventLog::new(), Dispatch::none())
    }

    fn engine(seed: u64) -> ShiftEngine<ChaCha20Rng> {
        ShiftEngine::new(ChaCha20Rng::seed_from_u64(seed))
    }

    #[test]
    fn shift_from_neutral_to_fourth() {
        let table = six_gears();
        let mut car = Vehicle::new("toyota", "1234yes");
        let mut recorder = recorder();

        let target = *table.get(4).unwrap();
        let report = engine(1)
            .shift(&mut car, &target, &table, &mut recorder)
            .unwrap();

        assert_eq!(car.current_gear(), 4);
        assert!((31..=40).contains(&car.current_speed()));

        let steps: Vec<usize> = recorder
            .sink()
            .events()
            .iter()
            .map(|e| e.gear_target_step)
            .collect();
        assert_eq!(steps, vec![0, 1, 2, 3]);
        assert_eq!(report.from_gear, 0);
        assert_eq!(report.to_gear, 4);
        assert_eq!(report.steps(), 4);
    }

    #[test]
    fn shift_from_third_to_fourth_records_one_step() {
        let table = six_gears();
        let mut car = Vehicle::new("toyota", "1234yes");
        car.settle(35, 3);
        let mut recorder = recorder();

        let target = *table.get(4).unwrap();
        engine(2)
            .shift(&mut car, &target, &table, &mut recorder)
            .unwrap();

        let events = recorder.sink().events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].gear_target_step, 3);
        assert_eq!(events[0].gear_before, 3);
        assert_eq!(events[0].speed_before, 35);
        assert_eq!(car.current_gear(), 4);
        assert!((31..=40).contains(&car.current_speed()));
    }

    #[test]
    fn events_capture_pre_step_state() {
        let table = six_gears();
        let mut car = Vehicle::new("toyota", "1234yes");
        let mut recorder = recorder();

        let target = *table.get(3).unwrap();
        engine(3)
            .shift(&mut car, &target, &table, &mut recorder)
            .unwrap();

        let events = recorder.sink().events();
        assert_eq!(events[0].speed_before, 0);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.gear_before, i);
            assert!(SPEED_CHANGE_RANGE.contains(&event.speed_change));
        }
        for pair in events.windows(2) {
            assert!(table
                .get(pair[0].gear_target_step)
                .unwrap()
                .contains(pair[1].speed_before));
        }
    }

    #[test]
    fn same_seed_reproduces_the_shift() {
        let table = six_gears();
        let target = *table.get(5).unwrap();

        let mut first = Vehicle::new("toyota", "1234yes");
        let mut second = first.clone();
        let mut rec_first = recorder();
        let mut rec_second = recorder();

        engine(42)
            .shift(&mut first, &target, &table, &mut rec_first)
            .unwrap();
        engine(42)
            .shift(&mut second, &target, &table, &mut rec_second)
            .unwrap();

        assert_eq!(first, second);
        let changes = |r: &EventRecorder<MemoryEventLog>| -> Vec<u32> {
            r.sink().events().iter().map(|e| e.speed_change).collect()
        };
        assert_eq!(changes(&rec_first), changes(&rec_second));
    }

    #[test]
    fn target_at_or_below_current_gear_is_a_no_op() {
        let table = six_gears();
        let mut car = Vehicle::new("toyota", "1234yes");
        car.settle(45, 4);
        let mut recorder = recorder();

        let target = *table.get(2).unwrap();
        let report = engine(4)
            .shift(&mut car, &target, &table, &mut recorder)
            .unwrap();

        assert_eq!(report.steps(), 0);
        assert_eq!(car.current_gear(), 4);
        assert_eq!(car.current_speed(), 45);
        assert!(recorder.sink().is_empty());
    }

    #[test]
    fn target_outside_table_stops_at_last_gear() {
        let table = GearTable::from_bands([(0, 10), (11, 20)]).unwrap();
        let mut car = Vehicle::new("toyota", "1234yes");
        let mut recorder = recorder();

        let report = engine(5)
            .shift(&mut car, &GearEntry::new(9, 90, 99), &table, &mut recorder)
            .unwrap();

        assert_eq!(report.to_gear, 2);
        assert_eq!(report.steps(), 2);
    }

    #[test]
    fn degenerate_band_settles_on_its_only_speed() {
        let table = GearTable::from_bands([(7, 7), (8, 8)]).unwrap();
        let mut car = Vehicle::new("toyota", "1234yes");
        let mut recorder = recorder();

        let target = *table.get(1).unwrap();
        engine(6)
            .shift(&mut car, &target, &table, &mut recorder)
            .unwrap();

        assert_eq!(car.current_speed(), 7);
    }

    #[test]
    fn each_step_is_logged_through_the_recorder_logger() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        let logger = crate::logging::open_diagnostic_log(&path, "debug").unwrap();

        let table = six_gears();
        let mut car = Vehicle::new("toyota", "1234yes");
        let mut recorder = EventRecorder::new(MemoryEventLog::new(), logger);

        let target = *table.get(2).unwrap();
        engine(8)
            .shift(&mut car, &target, &table, &mut recorder)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents
            .lines()
            .filter(|line| line.contains("Switching gears"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.contains("INFO")));
        assert!(lines[0].contains("vin=1234yes") && lines[0].contains("gear=0"));
        assert!(lines[1].contains("vin=1234yes") && lines[1].contains("gear=1"));
    }
}
