use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::rewards::PointsDelta;
use crate::task::StartTime;

/// Every successful planner mutation produces an Event.
/// Front ends drain them to refresh; the CLI prints them with `--json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskCreated {
        task_id: String,
        title: String,
        date: NaiveDate,
        at: DateTime<Utc>,
    },
    TaskCompleted {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskReopened {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskAssigned {
        task_id: String,
        start_time: StartTime,
        duration_hours: f64,
        at: DateTime<Utc>,
    },
    TaskUnassigned {
        task_id: String,
        at: DateTime<Utc>,
    },
    TaskMoved {
        task_id: String,
        from: NaiveDate,
        to: NaiveDate,
        at: DateTime<Utc>,
    },
    InvestedLogged {
        task_id: String,
        minutes: u32,
        total_minutes: u32,
        at: DateTime<Utc>,
    },
    PointsChanged {
        delta: PointsDelta,
        points: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Id of the task the event concerns, if any.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Event::TaskCreated { task_id, .. }
            | Event::TaskCompleted { task_id, .. }
            | Event::TaskReopened { task_id, .. }
            | Event::TaskDeleted { task_id, .. }
            | Event::TaskAssigned { task_id, .. }
            | Event::TaskUnassigned { task_id, .. }
            | Event::TaskMoved { task_id, .. }
            | Event::InvestedLogged { task_id, .. } => Some(task_id),
            Event::PointsChanged { .. } => None,
        }
    }
}
