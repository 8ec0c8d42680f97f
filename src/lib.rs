//! Gearshift: a stepwise gear-shift simulator
//!
//! Cars are created at rest in gear 0 and shifted up through a configured
//! gear table. A shift never jumps: the engine traverses every intermediate
//! gear, draws a random speed inside each traversed band, and writes one
//! timestamped record per step to an append-only event log.
//!
//! # Core Concepts
//!
//! - **GearTable**: Ordered, immutable gear bands loaded from configuration
//! - **Vehicle**: Fixed identity plus a speed and gear changed only by shifts
//! - **ShiftEngine**: Resolves a shift one gear at a time with an injected RNG
//! - **EventRecorder**: Appends and flushes one `ShiftEvent` per step
//!
//! # Example
//!
//! ```rust
//! use gearshift::core::{validate_gear_selection, GearTable, Vehicle};
//! use gearshift::engine::{seeded_rng, ShiftEngine};
//! use gearshift::recorder::{EventRecorder, MemoryEventLog};
//! use stillwater::validation::Validation;
//! use tracing::Dispatch;
//!
//! let table = GearTable::from_bands([(0, 10), (11, 20), (21, 30), (31, 40)]).unwrap();
//! let mut car = Vehicle::new("toyota", "1234yes");
//! let mut recorder = EventRecorder::new(MemoryEventLog::new(), Dispatch::none());
//! let mut engine = ShiftEngine::new(seeded_rng(Some(1)));
//!
//! let Validation::Success(target) = validate_gear_selection(&table, &car, 3) else {
//!     panic!("gear 3 is a valid upshift");
//! };
//! engine.shift(&mut car, &target, &table, &mut recorder).unwrap();
//!
//! assert_eq!(car.current_gear(), 3);
//! assert_eq!(recorder.sink().len(), 3);
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod fleet;
pub mod logging;
pub mod recorder;
pub mod session;
pub mod shell;

// Re-export commonly used types
pub use crate::core::{GearEntry, GearTable, SelectionError, ShiftEvent, Vehicle};
pub use engine::{ShiftEngine, ShiftReport};
pub use recorder::{EventRecorder, EventSink, StorageError};
