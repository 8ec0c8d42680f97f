//! Recording of shift steps to an append-only store.
//!
//! The [`EventRecorder`] stamps each step with the current UTC time, appends
//! it to an [`EventSink`], flushes the sink, and emits a diagnostic line
//! through its own logger handle. Nothing is buffered between steps.
//!
//! # Example
//!
//! ```rust
//! use gearshift::core::Vehicle;
//! use gearshift::recorder::{EventRecorder, MemoryEventLog};
//! use tracing::Dispatch;
//!
//! let mut recorder = EventRecorder::new(MemoryEventLog::new(), Dispatch::none());
//! let car = Vehicle::new("toyota", "1234yes");
//!
//! let event = recorder.record(&car, 3, 0).unwrap();
//! assert_eq!(event.gear_target_step, 0);
//! assert_eq!(recorder.sink().len(), 1);
//! ```

use crate::core::{ShiftEvent, Vehicle};
use chrono::Utc;
use thiserror::Error;
use tracing::{dispatcher, error, info, Dispatch};

mod csv_log;
mod memory;

pub use csv_log::{read_events, CsvEventLog, DEFAULT_EVENTS_PATH};
pub use memory::MemoryEventLog;

/// Errors raised by the event store. These are fatal for the process.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open event log {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write event record: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush event log: {0}")]
    Flush(#[from] std::io::Error),
}

/// Append-only destination for shift events.
pub trait EventSink {
    /// Append one event to the store.
    fn append(&mut self, event: &ShiftEvent) -> Result<(), StorageError>;

    /// Make every appended event durable.
    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn append(&mut self, event: &ShiftEvent) -> Result<(), StorageError> {
        (**self).append(event)
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        (**self).flush()
    }
}

/// Writes one timestamped record per shift step.
pub struct EventRecorder<S: EventSink> {
    sink: S,
    logger: Dispatch,
}

impl<S: EventSink> EventRecorder<S> {
    /// Create a recorder over `sink`, logging through `logger`.
    ///
    /// Pass `Dispatch::none()` to discard diagnostics.
    pub fn new(sink: S, logger: Dispatch) -> Self {
        Self { sink, logger }
    }

    /// Record one step from the vehicle's pre-step snapshot.
    ///
    /// The event is appended and flushed before this returns, so a following
    /// step never overtakes it.
    pub fn record(
        &mut self,
        vehicle: &Vehicle,
        speed_change: u32,
        gear_target_step: usize,
    ) -> Result<ShiftEvent, StorageError> {
        let event = ShiftEvent::from_snapshot(
            vehicle,
            speed_change,
            gear_target_step,
            Utc::now().timestamp(),
        );

        dispatcher::with_default(&self.logger, || {
            info!(vin = %event.vin, gear = gear_target_step, "Switching gears");
        });

        let result = self.sink.append(&event).and_then(|_| self.sink.flush());
        if let Err(err) = &result {
            dispatcher::with_default(&self.logger, || {
                error!(vin = %event.vin, "Event log write failed: {err}");
            });
        }

        result.map(|_| event)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
