//! Per-day aggregate statistics.
//!
//! Every task on the date counts, whatever its kind or placement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::tasks_on;
use crate::task::Task;

/// Coarse progress indicator for calendar cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    /// Nothing planned
    Empty,
    /// Every task done
    Done,
    /// More than half done
    Ahead,
    /// Half or less done
    Behind,
}

/// Counts and totals for one day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DayStats {
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
    /// Sum of estimates; tasks without one contribute 0
    pub total_minutes: u32,
    /// Sum of logged time; tasks without any contribute 0
    pub invested_minutes: u32,
    /// Exact `completed / total * 100`, or 0 for an empty day
    pub progress_percent: f64,
}

impl DayStats {
    /// Aggregate an arbitrary set of tasks.
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut stats = DayStats::default();
        for task in tasks {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            }
            stats.total_minutes = stats
                .total_minutes
                .saturating_add(task.estimated_minutes.unwrap_or(0));
            stats.invested_minutes = stats
                .invested_minutes
                .saturating_add(task.invested_minutes.unwrap_or(0));
        }
        stats.pending = stats.total - stats.completed;
        stats.progress_percent = if stats.total > 0 {
            stats.completed as f64 / stats.total as f64 * 100.0
        } else {
            0.0
        };
        stats
    }

    pub fn band(&self) -> ProgressBand {
        if self.total == 0 {
            ProgressBand::Empty
        } else if self.completed == self.total {
            ProgressBand::Done
        } else if self.progress_percent > 50.0 {
            ProgressBand::Ahead
        } else {
            ProgressBand::Behind
        }
    }
}

/// Statistics for every task dated `date`.
pub fn stats_for_day(all_tasks: &[Task], date: NaiveDate) -> DayStats {
    DayStats::from_tasks(tasks_on(all_tasks, date))
}

/// Render minutes as `"Xh Ym"`, dropping a zero part: `"1h 40m"`, `"2h"`, `"15m"`.
pub fn format_minutes(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
