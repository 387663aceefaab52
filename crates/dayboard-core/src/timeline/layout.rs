//! Hour occupancy and vertical stacking.
//!
//! A task is present in every integer hour its span touches. Within one
//! hour the tasks stack in the order they were handed in; there is no
//! re-sorting here, so the caller's store order is what the user sees.

use serde::Serialize;

use super::hours::{half_hour_label, hour_label, HourRange};
use super::marker::TimeMarker;
use crate::storage::TimelineConfig;
use crate::task::Task;

/// Whether `task` occupies `hour`.
///
/// The span starts at the task's start hour and ends at its fractional
/// start plus duration, so `09:30` for 0.75 h covers hours 9 and 10.
pub fn occupies(task: &Task, hour: u32) -> bool {
    match (task.start_time, task.end_hour()) {
        (Some(start), Some(end)) => start.hour() <= hour && (hour as f64) < end,
        _ => false,
    }
}

/// Scheduled tasks present in `hour`, in input order.
pub fn tasks_at_hour<'a>(scheduled: &[&'a Task], hour: u32) -> Vec<&'a Task> {
    scheduled
        .iter()
        .copied()
        .filter(|task| occupies(task, hour))
        .collect()
}

/// Where a task sits inside one hour row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Position in the hour's stack, 0-based
    pub stack_index: usize,
    /// Vertical offset from the top of the row
    pub offset: f64,
    pub height: f64,
    /// True only in the task's start hour
    pub starts_here: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedTask<'a> {
    pub task: &'a Task,
    pub placement: Placement,
}

/// One rendered hour of the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct HourRow<'a> {
    pub hour: u32,
    pub label: String,
    pub half_label: String,
    pub tasks: Vec<PlacedTask<'a>>,
}

impl HourRow<'_> {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Timeline geometry bound to a visible hour range.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineLayout {
    range: HourRange,
    row_height: f64,
    min_height: f64,
    unit_height: f64,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}

impl TimelineLayout {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            range: HourRange::from_config(config),
            row_height: config.row_height,
            min_height: config.min_height,
            unit_height: config.unit_height,
        }
    }

    pub fn range(&self) -> HourRange {
        self.range
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Rendered height: `max(min_height, duration_hours * unit_height)`.
    pub fn task_height(&self, task: &Task) -> f64 {
        (task.effective_duration_hours() * self.unit_height).max(self.min_height)
    }

    /// Stack offset of the `index`-th task in a row.
    pub fn stack_offset(&self, index: usize) -> f64 {
        index as f64 * self.row_height
    }

    /// Tasks present in a visible hour. Hours outside the range have none.
    pub fn tasks_at_hour<'a>(&self, scheduled: &[&'a Task], hour: u32) -> Vec<&'a Task> {
        if !self.range.contains(hour) {
            return Vec::new();
        }
        tasks_at_hour(scheduled, hour)
    }

    /// Lay out a single hour row.
    pub fn layout_hour<'a>(&self, scheduled: &[&'a Task], hour: u32) -> HourRow<'a> {
        let tasks = self
            .tasks_at_hour(scheduled, hour)
            .into_iter()
            .enumerate()
            .map(|(index, task)| PlacedTask {
                task,
                placement: Placement {
                    stack_index: index,
                    offset: self.stack_offset(index),
                    height: self.task_height(task),
                    starts_here: task.start_time.is_some_and(|s| s.hour() == hour),
                },
            })
            .collect();

        HourRow {
            hour,
            label: hour_label(hour),
            half_label: half_hour_label(hour),
            tasks,
        }
    }

    /// Lay out every visible hour.
    pub fn layout_day<'a>(&self, scheduled: &[&'a Task]) -> Vec<HourRow<'a>> {
        let rows: Vec<_> = self
            .range
            .hours()
            .map(|hour| self.layout_hour(scheduled, hour))
            .collect();
        tracing::debug!(
            hours = rows.len(),
            placed = rows.iter().map(|r| r.tasks.len()).sum::<usize>(),
            "laid out timeline"
        );
        rows
    }

    /// Position of the current-time marker for `now`.
    pub fn current_time_marker(&self, now: chrono::NaiveTime) -> TimeMarker {
        TimeMarker::at(now, self.range, self.row_height)
    }
}
