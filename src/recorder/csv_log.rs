//! CSV file sink for shift events.
//!
//! Rows have no header and follow the field order of [`ShiftEvent`]:
//! `epoch_seconds,vin,car_type,speed_before,gear_before,speed_change,gear_target_step`.

use super::{EventSink, StorageError};
use crate::core::ShiftEvent;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Default location of the event log
pub const DEFAULT_EVENTS_PATH: &str = "events.csv";

/// Append-mode CSV event log.
pub struct CsvEventLog {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvEventLog {
    /// Open `path` for appending, creating it if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StorageError::Open {
                path: path.display().to_string(),
                source,
            })?;

        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for CsvEventLog {
    fn append(&mut self, event: &ShiftEvent) -> Result<(), StorageError> {
        self.writer.serialize(event)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Read every event stored in a CSV event log.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<ShiftEvent>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    reader
        .deserialize()
        .map(|row| row.map_err(StorageError::from))
        .collect()
}
