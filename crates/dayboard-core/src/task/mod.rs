//! Task record and its value types.
//!
//! A task belongs to exactly one calendar day. Its `start_time` decides
//! whether it is placed on the hourly timeline; `kind` and the estimate
//! decide whether it shows up in the quick-task pool instead.

pub mod draft;

pub use draft::{QuickPreset, TaskDraft, QUICK_PRESETS};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

/// Estimate used when a task carries none.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 30;

/// Display priority. Only used to break ties in lists, never by the timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, lowest first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of task.
///
/// `SimpleRoutine` tasks always live in the quick-task pool, even when
/// they carry a start time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Normal,
    SimpleRoutine,
    ComplexRoutine,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Normal => "normal",
            TaskKind::SimpleRoutine => "simple_routine",
            TaskKind::ComplexRoutine => "complex_routine",
        }
    }
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::Normal
    }
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(TaskKind::Normal),
            "simple_routine" | "simple-routine" => Ok(TaskKind::SimpleRoutine),
            "complex_routine" | "complex-routine" => Ok(TaskKind::ComplexRoutine),
            other => Err(format!("unknown task kind: {other}")),
        }
    }
}

/// Wall-clock time of day, serialized as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StartTime {
    hour: u32,
    minute: u32,
}

impl StartTime {
    /// Build a start time, rejecting anything outside the 24-hour clock.
    pub fn new(hour: u32, minute: u32) -> Result<Self, PlannerError> {
        if hour > 23 || minute > 59 {
            return Err(PlannerError::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Start expressed in hours, e.g. `09:30` is `9.5`.
    pub fn fractional_hour(&self) -> f64 {
        self.hour as f64 + self.minute as f64 / 60.0
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for StartTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidStartTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour = h.parse::<u32>().map_err(|_| invalid())?;
        let minute = m.parse::<u32>().map_err(|_| invalid())?;
        StartTime::new(hour, minute)
    }
}

impl TryFrom<String> for StartTime {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StartTime> for String {
    fn from(value: StartTime) -> Self {
        value.to_string()
    }
}

/// A single planned task.
///
/// Optional fields stay optional on the wire: an absent value is skipped
/// rather than written as a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable
    pub id: String,
    /// Task title, never blank
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub completed: bool,
    /// Calendar day the task belongs to
    pub date: NaiveDate,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invested_minutes: Option<u32>,
    /// Present only for tasks placed on the timeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<StartTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub kind: TaskKind,
    /// Insertion sequence within `date`
    #[serde(default)]
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with default values for the given day.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        let now = Utc::now();
        Task {
            id: format!("task-{}-{}", now.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            description: None,
            tags: Vec::new(),
            completed: false,
            date,
            priority: Priority::Medium,
            estimated_minutes: Some(DEFAULT_ESTIMATE_MINUTES),
            invested_minutes: None,
            start_time: None,
            duration_hours: None,
            kind: TaskKind::Normal,
            order: 0,
            created_at: now,
        }
    }

    pub fn is_timed(&self) -> bool {
        self.start_time.is_some()
    }

    /// Estimate used for scheduling: falls back to the default when absent
    /// and never drops below one minute.
    pub fn effective_estimate(&self) -> u32 {
        self.estimated_minutes
            .unwrap_or(DEFAULT_ESTIMATE_MINUTES)
            .max(1)
    }

    /// Timeline duration in hours. Always strictly positive.
    pub fn effective_duration_hours(&self) -> f64 {
        match self.duration_hours {
            Some(hours) if hours > 0.0 && hours.is_finite() => hours,
            _ => self.effective_estimate() as f64 / 60.0,
        }
    }

    /// End of the task on the timeline, in fractional hours.
    pub fn end_hour(&self) -> Option<f64> {
        self.start_time
            .map(|start| start.fractional_hour() + self.effective_duration_hours())
    }
}

/// List ordering used by day views: open tasks first, then priority,
/// then insertion order.
pub fn display_cmp(a: &Task, b: &Task) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| a.priority.rank().cmp(&b.priority.rank()))
        .then_with(|| a.order.cmp(&b.order))
}

/// Stable sort of borrowed tasks by [`display_cmp`].
pub fn sort_for_display(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| display_cmp(a, b));
}
