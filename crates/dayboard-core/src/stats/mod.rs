//! Statistics module for Dayboard
//!
//! Per-day counts, estimate totals and completion progress, shared by the
//! calendar grid and the day summary.

mod day;

pub use day::{format_minutes, stats_for_day, DayStats, ProgressBand};
