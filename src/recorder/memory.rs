//! In-memory append-only event list.

use super::{EventSink, StorageError};
use crate::core::ShiftEvent;
use serde::{Deserialize, Serialize};

/// Ordered list of recorded events, kept in memory.
///
/// Events can only be appended; the list is never reordered or truncated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryEventLog {
    events: Vec<ShiftEvent>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// All recorded events in append order.
    pub fn events(&self) -> &[ShiftEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events recorded for a single vehicle.
    pub fn events_for<'a>(&'a self, vin: &'a str) -> impl Iterator<Item = &'a ShiftEvent> + 'a {
        self.events.iter().filter(move |event| event.vin == vin)
    }

    /// Gears traversed by `vin`: the starting gear, then the gear entered by
    /// each step.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gearshift::core::{ShiftEvent, Vehicle};
    /// use gearshift::recorder::{EventSink, MemoryEventLog};
    ///
    /// let car = Vehicle::new("toyota", "1234yes");
    /// let mut log = MemoryEventLog::new();
    /// log.append(&ShiftEvent::from_snapshot(&car, 2, 0, 0)).unwrap();
    ///
    /// assert_eq!(log.gear_path("1234yes"), vec![0, 1]);
    /// ```
    pub fn gear_path(&self, vin: &str) -> Vec<usize> {
        let mut path = Vec::new();
        let mut steps = self.events_for(vin).peekable();
        if let Some(first) = steps.peek() {
            path.push(first.gear_before);
        }
        for event in steps {
            path.push(event.gear_target_step + 1);
        }
        path
    }
}

impl EventSink for MemoryEventLog {
    fn append(&mut self, event: &ShiftEvent) -> Result<(), StorageError> {
        self.events.push(event.clone());
        Ok(())
    }
}
