//! Property-based invariant tests for the planner engines.
//!
//! 1. Every task on a day lands in exactly one bucket.
//! 2. Toggling twice restores the flag and the balance.
//! 3. The balance never goes negative for any toggle sequence.
//! 4. Stacking keeps input order with evenly spaced offsets.
//! 5. Tasks outside the visible hours never appear.

use chrono::NaiveDate;
use dayboard_core::storage::TaskConfig;
use dayboard_core::{
    partition, Bucket, PlannerState, StartTime, Task, TaskDraft, TaskKind, TimelineLayout,
};
use proptest::prelude::*;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        proptest::option::of(1u32..=240),
        proptest::option::of((0u32..24, 0u32..60)),
        prop_oneof![
            Just(TaskKind::Normal),
            Just(TaskKind::SimpleRoutine),
            Just(TaskKind::ComplexRoutine),
        ],
        0i64..3,
    )
        .prop_map(|(estimate, start, kind, day_offset)| {
            let date = day() + chrono::Duration::days(day_offset - 1);
            let mut task = Task::new("t", date);
            task.estimated_minutes = estimate;
            task.start_time = start.map(|(h, m)| StartTime::new(h, m).unwrap());
            task.kind = kind;
            task
        })
}

fn state_with(count: usize) -> (PlannerState, Vec<String>) {
    let mut state = PlannerState::new(day());
    let ids = (0..count)
        .map(|i| {
            state
                .create_task(TaskDraft::new(format!("t{i}")), day(), &TaskConfig::default())
                .unwrap()
                .id
                .clone()
        })
        .collect();
    (state, ids)
}

proptest! {
    #[test]
    fn partition_is_exclusive_and_complete(tasks in prop::collection::vec(task_strategy(), 0..40)) {
        let split = partition(&tasks, day());
        let on_day: Vec<&Task> = tasks.iter().filter(|t| t.date == day()).collect();
        prop_assert_eq!(split.len(), on_day.len());

        for task in on_day {
            let hits = [
                split.scheduled.iter().any(|t| t.id == task.id),
                split.unscheduled.iter().any(|t| t.id == task.id),
                split.unplaced.iter().any(|t| t.id == task.id),
            ];
            prop_assert_eq!(hits.iter().filter(|h| **h).count(), 1);
            if task.kind == TaskKind::SimpleRoutine {
                prop_assert_eq!(split.bucket_of(&task.id), Some(Bucket::Unscheduled));
            }
        }
    }

    #[test]
    fn double_toggle_is_identity(
        warmup in prop::collection::vec(0usize..5, 0..10),
        pick in 0usize..5,
    ) {
        let (mut state, ids) = state_with(5);
        for index in warmup {
            state.toggle_completed(&ids[index], 10).unwrap();
        }
        let before = state.clone();
        state.toggle_completed(&ids[pick], 10).unwrap();
        state.toggle_completed(&ids[pick], 10).unwrap();
        prop_assert_eq!(state, before);
    }

    #[test]
    fn points_never_negative(sequence in prop::collection::vec(0usize..4, 0..60)) {
        let mut seeded = Vec::new();
        for i in 0..4 {
            let mut task = Task::new(format!("t{i}"), day());
            task.completed = i % 2 == 0;
            seeded.push(task);
        }
        let ids: Vec<String> = seeded.iter().map(|t| t.id.clone()).collect();
        let mut state = PlannerState::from_snapshot(
            dayboard_core::Snapshot { tasks: seeded, points: 0 },
            day(),
        );

        let mut expected: i64 = 0;
        for pick in sequence {
            let outcome = state.toggle_completed(&ids[pick], 10).unwrap();
            expected = (expected + outcome.delta.signed()).max(0);
            prop_assert_eq!(outcome.points as i64, expected);
        }
    }

    #[test]
    fn stacking_preserves_order(count in 1usize..8, hour in 6u32..=23, minute in 0u32..60) {
        let (mut state, ids) = state_with(count);
        for id in &ids {
            state.assign(id, hour, minute).unwrap();
        }
        let layout = TimelineLayout::default();
        let split = state.partition(day(), 15);
        let row = layout.layout_hour(&split.scheduled, hour);

        prop_assert_eq!(row.tasks.len(), count);
        for (index, placed) in row.tasks.iter().enumerate() {
            prop_assert_eq!(&placed.task.id, &ids[index]);
            prop_assert_eq!(placed.placement.stack_index, index);
            prop_assert_eq!(placed.placement.offset, index as f64 * layout.row_height());
        }
    }

    #[test]
    fn hours_outside_range_are_empty(hour in 0u32..6) {
        let (mut state, ids) = state_with(1);
        state.assign(&ids[0], hour, 0).unwrap();
        let layout = TimelineLayout::default();
        let split = state.partition(day(), 15);

        prop_assert!(layout.tasks_at_hour(&split.scheduled, hour).is_empty());
        prop_assert!(layout.range().hours().all(|h| (6..=23).contains(&h)));
    }
}
