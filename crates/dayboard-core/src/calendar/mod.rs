//! Month calendar grid.
//!
//! Weeks start on Monday. The grid runs from the week holding the 1st
//! through the week holding the month's last day, so it always has whole
//! weeks (4 to 6 rows).

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::schedule::tasks_on;
use crate::stats::DayStats;
use crate::task::Task;

/// Task titles previewed in a calendar cell before "+N more".
pub const PREVIEW_LIMIT: usize = 3;

/// One cell of the month grid.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months
    pub in_month: bool,
    pub is_today: bool,
    pub stats: DayStats,
    /// First titles in store order
    pub preview: Vec<String>,
    /// Tasks beyond the preview
    pub overflow: usize,
}

/// First and last day of the month containing `anchor`.
pub fn month_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    (first, last)
}

/// Dates shown for the month containing `anchor`, Monday first.
pub fn grid_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    let (first, last) = month_bounds(anchor);
    let lead = first.weekday().num_days_from_monday() as u64;
    let trail = 6 - last.weekday().num_days_from_monday() as u64;
    let start = first - Days::new(lead);
    let end = last + Days::new(trail);

    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Build the month grid with per-day statistics and title previews.
pub fn month_grid(anchor: NaiveDate, today: NaiveDate, tasks: &[Task]) -> Vec<CalendarDay> {
    let month = (anchor.year(), anchor.month());
    grid_dates(anchor)
        .into_iter()
        .map(|date| {
            let day_tasks: Vec<&Task> = tasks_on(tasks, date).collect();
            CalendarDay {
                date,
                in_month: (date.year(), date.month()) == month,
                is_today: date == today,
                stats: DayStats::from_tasks(day_tasks.iter().copied()),
                preview: day_tasks
                    .iter()
                    .take(PREVIEW_LIMIT)
                    .map(|t| t.title.clone())
                    .collect(),
                overflow: day_tasks.len().saturating_sub(PREVIEW_LIMIT),
            }
        })
        .collect()
}

/// Move `anchor` by whole months, clamping the day to the target month.
pub fn shift_month(anchor: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        anchor.checked_add_months(months)
    } else {
        anchor.checked_sub_months(months)
    };
    shifted.unwrap_or(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_starts_monday_and_covers_whole_weeks() {
        // March 2026 starts on a Sunday and ends on a Tuesday.
        let dates = grid_dates(date(2026, 3, 14));
        assert_eq!(dates.first().unwrap().weekday(), Weekday::Mon);
        assert_eq!(dates.last().unwrap().weekday(), Weekday::Sun);
        assert_eq!(*dates.first().unwrap(), date(2026, 2, 23));
        assert_eq!(*dates.last().unwrap(), date(2026, 4, 5));
        assert_eq!(dates.len() % 7, 0);
        assert_eq!(dates.len(), 42);
    }

    #[test]
    fn february_starting_monday_is_four_weeks() {
        // February 2027 starts on a Monday and has 28 days.
        let dates = grid_dates(date(2027, 2, 10));
        assert_eq!(dates.len(), 28);
        assert_eq!(dates[0], date(2027, 2, 1));
    }

    #[test]
    fn month_grid_fills_stats_and_preview() {
        let day = date(2026, 3, 14);
        let mut tasks: Vec<Task> = (0..5).map(|i| Task::new(format!("t{i}"), day)).collect();
        tasks[0].completed = true;

        let grid = month_grid(day, day, &tasks);
        let cell = grid.iter().find(|c| c.date == day).unwrap();
        assert!(cell.in_month);
        assert!(cell.is_today);
        assert_eq!(cell.stats.total, 5);
        assert_eq!(cell.stats.completed, 1);
        assert_eq!(cell.preview, vec!["t0", "t1", "t2"]);
        assert_eq!(cell.overflow, 2);

        let leading = &grid[0];
        assert!(!leading.in_month);
        assert_eq!(leading.stats.total, 0);
    }

    #[test]
    fn shift_month_clamps_day() {
        assert_eq!(shift_month(date(2026, 1, 31), 1), date(2026, 2, 28));
        assert_eq!(shift_month(date(2026, 3, 14), -3), date(2025, 12, 14));
        assert_eq!(shift_month(date(2026, 3, 14), 0), date(2026, 3, 14));
    }

    #[test]
    fn month_bounds_handles_december() {
        assert_eq!(
            month_bounds(date(2026, 12, 5)),
            (date(2026, 12, 1), date(2026, 12, 31))
        );
    }
}
