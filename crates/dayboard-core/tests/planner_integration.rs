//! Integration tests for the planner over real stores.

use chrono::NaiveDate;
use dayboard_core::storage::migrations::{get_schema_version, SCHEMA_VERSION};
use dayboard_core::timeline::tasks_at_hour;
use dayboard_core::{
    partition, stats_for_day, Bucket, Config, CoreError, Event, MemoryStore, Planner,
    PlannerError, PlannerStore, Priority, QuickPreset, SqliteStore, TaskDraft, TimelineLayout,
};
use tempfile::TempDir;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

#[test]
fn test_full_day_workflow_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("dayboard.db");

    let (read_id, routine_id) = {
        let store = SqliteStore::open_at(&db_path).unwrap();
        let mut planner = Planner::open(store, Config::default(), day()).unwrap();

        let read = planner
            .create_task(TaskDraft::new("Read paper").with_estimate(45), day())
            .unwrap();
        planner
            .create_task(
                TaskDraft::new("Plan sprint")
                    .with_priority(Priority::High)
                    .with_estimate(90),
                day(),
            )
            .unwrap();
        let routine = planner
            .add_quick_task(QuickPreset::find("water").unwrap(), day())
            .unwrap();

        planner.assign(&read.id, 9, 30).unwrap();
        planner.toggle_completed(&routine.id).unwrap();
        planner.log_invested_minutes(&read.id, 20).unwrap();
        (read.id, routine.id)
    };

    let store = SqliteStore::open_at(&db_path).unwrap();
    assert_eq!(get_schema_version(store.conn()), SCHEMA_VERSION);
    let planner = Planner::open(store, Config::default(), day()).unwrap();
    let state = planner.state();

    assert_eq!(state.tasks().len(), 3);
    assert_eq!(state.points(), 10);

    let read = state.task(&read_id).unwrap();
    assert_eq!(read.start_time.unwrap().to_string(), "09:30");
    assert_eq!(read.duration_hours, Some(0.75));
    assert_eq!(read.invested_minutes, Some(20));
    assert!(state.task(&routine_id).unwrap().completed);

    let day_split = planner.partition(day());
    assert_eq!(day_split.bucket_of(&read_id), Some(Bucket::Scheduled));
    assert_eq!(day_split.bucket_of(&routine_id), Some(Bucket::Unscheduled));
    assert_eq!(day_split.unplaced.len(), 1);
}

#[test]
fn test_assign_occupies_start_and_following_hour() {
    let mut planner = Planner::open(MemoryStore::new(), Config::default(), day()).unwrap();
    let task = planner
        .create_task(TaskDraft::new("Read").with_estimate(45), day())
        .unwrap();
    planner.assign(&task.id, 9, 30).unwrap();

    let split = partition(planner.state().tasks(), day());
    assert_eq!(tasks_at_hour(&split.scheduled, 9).len(), 1);
    assert_eq!(tasks_at_hour(&split.scheduled, 10).len(), 1);
    assert!(tasks_at_hour(&split.scheduled, 11).is_empty());

    let rows = planner.layout(day());
    assert_eq!(rows.first().unwrap().hour, 6);
    assert_eq!(rows.last().unwrap().hour, 23);
    let row9 = rows.iter().find(|r| r.hour == 9).unwrap();
    let row10 = rows.iter().find(|r| r.hour == 10).unwrap();
    assert!(row9.tasks[0].placement.starts_here);
    assert!(!row10.tasks[0].placement.starts_here);
}

#[test]
fn test_stacking_follows_store_order() {
    let mut planner = Planner::open(MemoryStore::new(), Config::default(), day()).unwrap();
    let mut ids = Vec::new();
    for title in ["first", "second", "third"] {
        let task = planner
            .create_task(TaskDraft::new(title).with_estimate(60), day())
            .unwrap();
        planner.assign(&task.id, 14, 0).unwrap();
        ids.push(task.id);
    }
    assert_eq!(planner.state().overlapping(&ids[0]).len(), 2);

    let layout = TimelineLayout::new(&planner.config().timeline);
    let rows = planner.layout(day());
    let row = rows.iter().find(|r| r.hour == 14).unwrap();
    let placed: Vec<(&str, f64)> = row
        .tasks
        .iter()
        .map(|p| (p.task.id.as_str(), p.placement.offset))
        .collect();
    let row_height = layout.row_height();
    assert_eq!(
        placed,
        vec![
            (ids[0].as_str(), 0.0),
            (ids[1].as_str(), row_height),
            (ids[2].as_str(), 2.0 * row_height),
        ]
    );
}

#[test]
fn test_day_stats_from_planner() {
    let mut planner = Planner::open(MemoryStore::new(), Config::default(), day()).unwrap();
    for (i, minutes) in [30, 15, 45, 10].into_iter().enumerate() {
        let task = planner
            .create_task(TaskDraft::new(format!("task {i}")).with_estimate(minutes), day())
            .unwrap();
        if i < 3 {
            planner.toggle_completed(&task.id).unwrap();
        }
    }

    let stats = stats_for_day(planner.state().tasks(), day());
    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.total_minutes, 100);
    assert_eq!(stats.progress_percent, 75.0);
    assert_eq!(planner.state().points(), 30);
}

#[test]
fn test_errors_leave_store_untouched() {
    let mut planner = Planner::open(MemoryStore::new(), Config::default(), day()).unwrap();
    let task = planner.create_task(TaskDraft::new("a"), day()).unwrap();
    planner.drain_events();

    let errors = [
        planner.toggle_completed("missing").unwrap_err(),
        planner.delete_task("missing").unwrap_err(),
        planner.move_to_date("missing", day()).unwrap_err(),
        planner.assign(&task.id, 9, 75).unwrap_err(),
    ];
    for err in &errors {
        assert!(matches!(err, CoreError::Planner(_)), "unexpected error: {err}");
    }
    assert!(matches!(
        errors[3],
        CoreError::Planner(PlannerError::InvalidTime { hour: 9, minute: 75 })
    ));

    assert_eq!(planner.store().save_count(), 1);
    assert!(planner.drain_events().is_empty());
    assert!(planner.state().task(&task.id).unwrap().start_time.is_none());
}

#[test]
fn test_move_and_delete_emit_events() {
    let mut planner = Planner::open(MemoryStore::new(), Config::default(), day()).unwrap();
    let task = planner.create_task(TaskDraft::new("a"), day()).unwrap();
    let tomorrow = day().succ_opt().unwrap();
    planner.move_to_date(&task.id, tomorrow).unwrap();
    planner.unassign(&task.id).unwrap();
    planner.delete_task(&task.id).unwrap();

    let events = planner.drain_events();
    assert_eq!(events.len(), 4);
    assert!(matches!(&events[1], Event::TaskMoved { to, .. } if *to == tomorrow));
    assert!(matches!(events[2], Event::TaskUnassigned { .. }));
    assert!(events.iter().all(|e| e.task_id() == Some(task.id.as_str())));

    let mut store = planner.into_store();
    assert!(store.load().unwrap().tasks.is_empty());
}

#[test]
fn test_stats_saturate_on_huge_logged_time() {
    let mut planner = Planner::open(MemoryStore::new(), Config::default(), day()).unwrap();
    let a = planner.create_task(TaskDraft::new("a"), day()).unwrap();
    let b = planner.create_task(TaskDraft::new("b"), day()).unwrap();
    planner.log_invested_minutes(&a.id, u32::MAX).unwrap();
    planner.log_invested_minutes(&b.id, 10).unwrap();

    let stats = stats_for_day(planner.state().tasks(), day());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.invested_minutes, u32::MAX);
    assert_eq!(stats.total_minutes, 60);
}
