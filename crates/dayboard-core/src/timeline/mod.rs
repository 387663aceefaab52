//! Timeline layout engine.
//!
//! This module provides:
//! - The visible hour range and its labels
//! - Hour occupancy and stacking of scheduled tasks
//! - The current-time marker

mod hours;
mod layout;
mod marker;

pub use hours::{half_hour_label, hour_label, HourRange};
pub use layout::{occupies, tasks_at_hour, HourRow, PlacedTask, Placement, TimelineLayout};
pub use marker::TimeMarker;
