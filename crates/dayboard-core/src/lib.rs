//! # Dayboard Core Library
//!
//! This library provides the core logic for Dayboard, a single-user daily
//! planner. All operations are available through the `dayboard-cli` binary,
//! which is a thin front end over the same core.
//!
//! ## Architecture
//!
//! - **Task Store**: explicit [`PlannerState`] with pure commands, bound to a
//!   [`PlannerStore`] by [`Planner`] which saves after every command
//! - **Day Partitioner**: splits a day into scheduled, quick and unplaced tasks
//! - **Timeline**: hour occupancy, stacking geometry and the current-time marker
//! - **Scheduler**: turns "place task at hour" into a start time and duration
//! - **Statistics / Calendar**: per-day aggregates and the month grid
//! - **Storage**: SQLite task store and TOML configuration
//!
//! ## Key Components
//!
//! - [`Planner`]: state plus persistence and events
//! - [`SqliteStore`]: task and points persistence
//! - [`Config`]: application configuration management
//! - [`TimelineLayout`]: timeline geometry

pub mod calendar;
pub mod clock;
pub mod error;
pub mod events;
pub mod planner;
pub mod rewards;
pub mod schedule;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timeline;

pub use calendar::{month_grid, shift_month, CalendarDay};
pub use clock::{Clock, FixedClock, MinuteRefresh, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, PlannerError, Result};
pub use events::Event;
pub use planner::{Planner, PlannerState, ToggleOutcome};
pub use rewards::{PointsDelta, PointsLedger};
pub use schedule::{partition, Bucket, DayPartition};
pub use stats::{stats_for_day, DayStats, ProgressBand};
pub use storage::{Config, MemoryStore, PlannerStore, Snapshot, SqliteStore};
pub use task::{Priority, QuickPreset, StartTime, Task, TaskDraft, TaskKind};
pub use timeline::{HourRange, HourRow, TimeMarker, TimelineLayout};
