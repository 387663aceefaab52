//! Day partitioning.
//!
//! Splits one day's tasks into the buckets the planner surfaces:
//! - **scheduled**: placed on the hourly timeline
//! - **unscheduled**: the quick-task pool (simple routines and short untimed tasks)
//! - **unplaced**: untimed, longer tasks that still need a slot
//!
//! Every task on the day lands in exactly one bucket. Input order is kept
//! inside each bucket because the timeline stacks in that order.

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::{Task, TaskKind};

/// Estimate at or below which an untimed task counts as a quick task.
pub const QUICK_TASK_MAX_MINUTES: u32 = 15;

/// Which bucket a task falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Scheduled,
    Unscheduled,
    Unplaced,
}

/// Classify a single task against the quick-task threshold.
///
/// An absent estimate is never "short", so such a task only becomes
/// visible once it is given a start time.
pub fn classify(task: &Task, quick_threshold: u32) -> Bucket {
    let short_untimed = task.start_time.is_none()
        && task
            .estimated_minutes
            .is_some_and(|minutes| minutes <= quick_threshold);

    if task.kind == TaskKind::SimpleRoutine || short_untimed {
        Bucket::Unscheduled
    } else if task.start_time.is_some() {
        Bucket::Scheduled
    } else {
        Bucket::Unplaced
    }
}

/// One day's tasks split into buckets, borrowing from the task store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayPartition<'a> {
    pub scheduled: Vec<&'a Task>,
    pub unscheduled: Vec<&'a Task>,
    pub unplaced: Vec<&'a Task>,
}

impl<'a> DayPartition<'a> {
    pub fn len(&self) -> usize {
        self.scheduled.len() + self.unscheduled.len() + self.unplaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bucket_of(&self, id: &str) -> Option<Bucket> {
        let has = |list: &[&Task]| list.iter().any(|t| t.id == id);
        if has(&self.scheduled) {
            Some(Bucket::Scheduled)
        } else if has(&self.unscheduled) {
            Some(Bucket::Unscheduled)
        } else if has(&self.unplaced) {
            Some(Bucket::Unplaced)
        } else {
            None
        }
    }
}

/// Tasks on `date`, in store order.
pub fn tasks_on<'a>(all_tasks: &'a [Task], date: NaiveDate) -> impl Iterator<Item = &'a Task> {
    all_tasks.iter().filter(move |t| t.date == date)
}

/// Partition with the default quick-task threshold.
pub fn partition(all_tasks: &[Task], date: NaiveDate) -> DayPartition<'_> {
    partition_with_threshold(all_tasks, date, QUICK_TASK_MAX_MINUTES)
}

/// Partition using a configured quick-task threshold.
pub fn partition_with_threshold(
    all_tasks: &[Task],
    date: NaiveDate,
    quick_threshold: u32,
) -> DayPartition<'_> {
    let mut day = DayPartition::default();
    for task in tasks_on(all_tasks, date) {
        match classify(task, quick_threshold) {
            Bucket::Scheduled => day.scheduled.push(task),
            Bucket::Unscheduled => day.unscheduled.push(task),
            Bucket::Unplaced => day.unplaced.push(task),
        }
    }
    tracing::debug!(
        %date,
        scheduled = day.scheduled.len(),
        unscheduled = day.unscheduled.len(),
        unplaced = day.unplaced.len(),
        "partitioned day"
    );
    day
}
