//! Scheduling assigner.
//!
//! Turns "place task T at hour H" (a drop onto an hour row) into a
//! concrete start time and duration. Placements may overlap; overlapping
//! tasks simply stack in the timeline. [`overlapping`] lets a caller warn
//! about a collision without blocking it.

use crate::error::PlannerError;
use crate::task::{StartTime, Task, TaskKind};

fn find_mut<'a>(tasks: &'a mut [Task], id: &str) -> Result<&'a mut Task, PlannerError> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| PlannerError::NotFound(id.to_string()))
}

/// Place task `id` at `hour:minute`.
///
/// Sets the start time and, if the task has none yet, a duration derived
/// from its estimate. On error the task list is unchanged.
pub fn assign<'a>(
    tasks: &'a mut [Task],
    id: &str,
    hour: u32,
    minute: u32,
) -> Result<&'a Task, PlannerError> {
    let start = StartTime::new(hour, minute)?;
    let task = find_mut(tasks, id)?;

    task.start_time = Some(start);
    if task.duration_hours.is_none() {
        task.duration_hours = Some(task.effective_estimate() as f64 / 60.0);
    }

    tracing::info!(
        task_id = %task.id,
        start = %start,
        duration_hours = ?task.duration_hours,
        "assigned task to timeline"
    );
    Ok(task)
}

/// Take task `id` off the timeline.
pub fn unassign<'a>(tasks: &'a mut [Task], id: &str) -> Result<&'a Task, PlannerError> {
    let task = find_mut(tasks, id)?;
    task.start_time = None;
    task.duration_hours = None;
    tracing::info!(task_id = %task.id, "removed task from timeline");
    Ok(task)
}

/// Timeline tasks on the same day whose span intersects task `id`.
///
/// Simple routines never sit on the timeline, so they neither collide nor
/// are collided with. An unknown or untimed task has no overlaps.
pub fn overlapping<'a>(tasks: &'a [Task], id: &str) -> Vec<&'a Task> {
    let Some(target) = tasks.iter().find(|t| t.id == id) else {
        return Vec::new();
    };
    let Some(span) = timeline_span(target) else {
        return Vec::new();
    };

    tasks
        .iter()
        .filter(|other| other.id != target.id && other.date == target.date)
        .filter(|other| {
            timeline_span(other).is_some_and(|(start, end)| start < span.1 && span.0 < end)
        })
        .collect()
}

fn timeline_span(task: &Task) -> Option<(f64, f64)> {
    if task.kind == TaskKind::SimpleRoutine {
        return None;
    }
    let start = task.start_time?.fractional_hour();
    Some((start, start + task.effective_duration_hours()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn task(title: &str, minutes: u32) -> Task {
        let mut t = Task::new(title, day());
        t.estimated_minutes = Some(minutes);
        t
    }

    #[test]
    fn assign_sets_start_and_derived_duration() {
        let mut tasks = vec![task("read", 45)];
        let id = tasks[0].id.clone();
        let updated = assign(&mut tasks, &id, 9, 30).unwrap();
        assert_eq!(updated.start_time.unwrap().to_string(), "09:30");
        assert_eq!(updated.duration_hours, Some(0.75));
    }

    #[test]
    fn assign_keeps_existing_duration() {
        let mut tasks = vec![task("deep work", 30)];
        tasks[0].duration_hours = Some(2.0);
        let id = tasks[0].id.clone();
        let updated = assign(&mut tasks, &id, 14, 0).unwrap();
        assert_eq!(updated.duration_hours, Some(2.0));
        assert_eq!(updated.start_time.unwrap().to_string(), "14:00");
    }

    #[test]
    fn assign_without_estimate_uses_default() {
        let mut tasks = vec![task("vague", 0)];
        tasks[0].estimated_minutes = None;
        let id = tasks[0].id.clone();
        let updated = assign(&mut tasks, &id, 8, 0).unwrap();
        assert_eq!(updated.duration_hours, Some(0.5));
    }

    #[test]
    fn assign_unknown_id_is_not_found() {
        let mut tasks = vec![task("a", 30)];
        let before = tasks.clone();
        let err = assign(&mut tasks, "missing", 9, 0).unwrap_err();
        assert_eq!(err, PlannerError::NotFound("missing".into()));
        assert_eq!(tasks, before);
    }

    #[test]
    fn assign_rejects_impossible_time() {
        let mut tasks = vec![task("a", 30)];
        let id = tasks[0].id.clone();
        let before = tasks.clone();
        assert!(matches!(
            assign(&mut tasks, &id, 24, 0),
            Err(PlannerError::InvalidTime { hour: 24, minute: 0 })
        ));
        assert!(assign(&mut tasks, &id, 9, 60).is_err());
        assert_eq!(tasks, before);
    }

    #[test]
    fn assign_allows_overlap() {
        let mut tasks = vec![task("a", 60), task("b", 60)];
        let (a, b) = (tasks[0].id.clone(), tasks[1].id.clone());
        assign(&mut tasks, &a, 10, 0).unwrap();
        assign(&mut tasks, &b, 10, 30).unwrap();

        let clashes = overlapping(&tasks, &a);
        assert_eq!(clashes.len(), 1);
        assert_eq!(clashes[0].id, b);
    }

    #[test]
    fn back_to_back_tasks_do_not_overlap() {
        let mut tasks = vec![task("a", 60), task("b", 60)];
        let (a, b) = (tasks[0].id.clone(), tasks[1].id.clone());
        assign(&mut tasks, &a, 10, 0).unwrap();
        assign(&mut tasks, &b, 11, 0).unwrap();
        assert!(overlapping(&tasks, &a).is_empty());
    }

    #[test]
    fn overlap_ignores_routines_and_other_days() {
        let mut tasks = vec![task("a", 60), task("routine", 5), task("other day", 60)];
        tasks[1].kind = TaskKind::SimpleRoutine;
        tasks[2].date = day().succ_opt().unwrap();
        let ids: Vec<String> = tasks.iter().map(|t| t.id.clone()).collect();
        for id in &ids {
            assign(&mut tasks, id, 9, 0).unwrap();
        }
        assert!(overlapping(&tasks, &ids[0]).is_empty());
        assert!(overlapping(&tasks, &ids[1]).is_empty());
    }

    #[test]
    fn unassign_clears_timeline_fields() {
        let mut tasks = vec![task("a", 30)];
        let id = tasks[0].id.clone();
        assign(&mut tasks, &id, 9, 0).unwrap();
        let cleared = unassign(&mut tasks, &id).unwrap();
        assert!(cleared.start_time.is_none());
        assert!(cleared.duration_hours.is_none());
        assert!(unassign(&mut tasks, "nope").is_err());
    }
}
