//! Core simulation types.
//!
//! This module contains the data model of the simulator:
//! - Gear definitions and the ordered gear table
//! - The vehicle and its drive state
//! - Shift event records
//! - Validation of car and gear selections
//!
//! Nothing in this module performs I/O; recording and randomness live in
//! the `recorder` and `engine` modules.

mod event;
mod gear;
mod selection;
mod vehicle;

pub use event::ShiftEvent;
pub use gear::{GearEntry, GearTable, GEAR_KEY_PREFIX};
pub use selection::{parse_index, validate_gear_selection, GearSelection, SelectionError};
pub use vehicle::Vehicle;
