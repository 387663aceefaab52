//! Task store and commands.
//!
//! [`PlannerState`] is the explicit in-memory state: every task, the points
//! balance and the selected date. Its commands are pure. [`Planner`] pairs
//! that state with a [`PlannerStore`] and flushes the whole set after each
//! successful command.

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::calendar::{self, CalendarDay};
use crate::error::{PlannerError, Result};
use crate::events::Event;
use crate::rewards::{PointsDelta, PointsLedger};
use crate::schedule::{self, DayPartition};
use crate::scheduler;
use crate::stats::{self, DayStats};
use crate::storage::{Config, PlannerStore, Snapshot, TaskConfig};
use crate::task::{self, QuickPreset, StartTime, Task, TaskDraft};
use crate::timeline::{HourRow, TimelineLayout};

/// Result of flipping a task's completion flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleOutcome {
    pub task: Task,
    pub delta: PointsDelta,
    /// Balance after the delta
    pub points: u32,
}

/// Tasks, points and the selected date.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerState {
    tasks: Vec<Task>,
    ledger: PointsLedger,
    selected_date: NaiveDate,
}

impl PlannerState {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            ledger: PointsLedger::default(),
            selected_date,
        }
    }

    pub fn from_snapshot(snapshot: Snapshot, selected_date: NaiveDate) -> Self {
        Self {
            tasks: snapshot.tasks,
            ledger: PointsLedger::new(snapshot.points),
            selected_date,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn points(&self) -> u32 {
        self.ledger.points()
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task, PlannerError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))
    }

    /// Insertion sequence for the next task on `date`.
    fn next_order(&self, date: NaiveDate) -> u32 {
        schedule::tasks_on(&self.tasks, date).count() as u32
    }

    fn push(&mut self, task: Task) -> &Task {
        tracing::info!(task_id = %task.id, title = %task.title, date = %task.date, "created task");
        let index = self.tasks.len();
        self.tasks.push(task);
        &self.tasks[index]
    }

    /// Validate a draft and append it to `date`.
    pub fn create_task(
        &mut self,
        draft: TaskDraft,
        date: NaiveDate,
        config: &TaskConfig,
    ) -> Result<&Task, PlannerError> {
        let order = self.next_order(date);
        let task = draft.into_task(date, order, config)?;
        Ok(self.push(task))
    }

    /// Append a one-tap routine to `date`.
    pub fn add_quick_task(&mut self, preset: &QuickPreset, date: NaiveDate) -> &Task {
        let order = self.next_order(date);
        self.push(preset.to_task(date, order))
    }

    /// Flip completion and move `per_task` points with it.
    pub fn toggle_completed(
        &mut self,
        id: &str,
        per_task: u32,
    ) -> Result<ToggleOutcome, PlannerError> {
        let task = self.task_mut(id)?;
        task.completed = !task.completed;
        let task = task.clone();

        let delta = PointsLedger::delta_for(task.completed, per_task);
        let points = self.ledger.apply(delta);
        tracing::info!(task_id = %task.id, completed = task.completed, points, "toggled task");
        Ok(ToggleOutcome { task, delta, points })
    }

    /// Remove a task and return it.
    pub fn delete_task(&mut self, id: &str) -> Result<Task, PlannerError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))?;
        let task = self.tasks.remove(index);
        tracing::info!(task_id = %task.id, "deleted task");
        Ok(task)
    }

    /// Move a task to another day, placing it last there.
    ///
    /// Moving to the day it is already on changes nothing.
    pub fn move_to_date(&mut self, id: &str, date: NaiveDate) -> Result<&Task, PlannerError> {
        let current = self
            .task(id)
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))?
            .date;
        let order = self.next_order(date);
        let task = self.task_mut(id)?;
        if current != date {
            task.date = date;
            task.order = order;
            tracing::info!(task_id = %task.id, from = %current, to = %date, "moved task");
        }
        Ok(task)
    }

    /// Add worked minutes to a task's running total.
    pub fn log_invested_minutes(&mut self, id: &str, minutes: u32) -> Result<&Task, PlannerError> {
        let task = self.task_mut(id)?;
        let total = task.invested_minutes.unwrap_or(0).saturating_add(minutes);
        task.invested_minutes = Some(total);
        tracing::info!(task_id = %task.id, minutes, total, "logged invested time");
        Ok(task)
    }

    pub fn assign(&mut self, id: &str, hour: u32, minute: u32) -> Result<&Task, PlannerError> {
        scheduler::assign(&mut self.tasks, id, hour, minute)
    }

    pub fn unassign(&mut self, id: &str) -> Result<&Task, PlannerError> {
        scheduler::unassign(&mut self.tasks, id)
    }

    /// Timeline tasks colliding with `id`.
    pub fn overlapping(&self, id: &str) -> Vec<&Task> {
        scheduler::overlapping(&self.tasks, id)
    }

    /// Tasks on `date` in store order.
    pub fn tasks_for_day(&self, date: NaiveDate) -> Vec<&Task> {
        schedule::tasks_on(&self.tasks, date).collect()
    }

    /// Tasks on `date`: open first, then by priority, then insertion order.
    pub fn sorted_for_display(&self, date: NaiveDate) -> Vec<&Task> {
        let mut tasks = self.tasks_for_day(date);
        task::sort_for_display(&mut tasks);
        tasks
    }

    pub fn partition(&self, date: NaiveDate, quick_threshold: u32) -> DayPartition<'_> {
        schedule::partition_with_threshold(&self.tasks, date, quick_threshold)
    }

    pub fn stats(&self, date: NaiveDate) -> DayStats {
        stats::stats_for_day(&self.tasks, date)
    }

    /// Hour rows for the scheduled tasks on `date`.
    pub fn layout(
        &self,
        date: NaiveDate,
        layout: &TimelineLayout,
        quick_threshold: u32,
    ) -> Vec<HourRow<'_>> {
        let day = self.partition(date, quick_threshold);
        layout.layout_day(&day.scheduled)
    }

    /// Month grid around the selected date.
    pub fn month(&self, today: NaiveDate) -> Vec<CalendarDay> {
        calendar::month_grid(self.selected_date, today, &self.tasks)
    }
}

/// Planner state bound to a store.
///
/// Every successful command is followed by a full save and yields events.
/// A failed command leaves the state untouched. When the save itself fails
/// the state is restored to what it was before the command.
pub struct Planner<S: PlannerStore> {
    state: PlannerState,
    store: S,
    config: Config,
    events: Vec<Event>,
}

impl<S: PlannerStore> Planner<S> {
    /// Load the store's snapshot and select `today`.
    pub fn open(mut store: S, config: Config, today: NaiveDate) -> Result<Self> {
        let snapshot = store.load()?;
        tracing::debug!(tasks = snapshot.tasks.len(), points = snapshot.points, "loaded planner");
        Ok(Self {
            state: PlannerState::from_snapshot(snapshot, today),
            store,
            config,
            events: Vec::new(),
        })
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Take the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.select_date(date);
    }

    /// Move the selected date by whole months.
    pub fn shift_month(&mut self, delta: i32) -> NaiveDate {
        let date = calendar::shift_month(self.state.selected_date, delta);
        self.state.select_date(date);
        date
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.state.tasks, self.state.points())
    }

    fn commit(
        &mut self,
        before: PlannerState,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<()> {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "save failed, restoring previous state");
            self.state = before;
            return Err(e);
        }
        self.events.extend(events);
        Ok(())
    }

    pub fn create_task(&mut self, draft: TaskDraft, date: NaiveDate) -> Result<Task> {
        let before = self.state.clone();
        let task = self
            .state
            .create_task(draft, date, &self.config.tasks)?
            .clone();
        self.commit(before, [created(&task)])?;
        Ok(task)
    }

    pub fn add_quick_task(&mut self, preset: &QuickPreset, date: NaiveDate) -> Result<Task> {
        let before = self.state.clone();
        let task = self.state.add_quick_task(preset, date).clone();
        self.commit(before, [created(&task)])?;
        Ok(task)
    }

    pub fn toggle_completed(&mut self, id: &str) -> Result<ToggleOutcome> {
        let before = self.state.clone();
        let outcome = self
            .state
            .toggle_completed(id, self.config.rewards.points_per_task)?;
        let at = Utc::now();
        let task_id = outcome.task.id.clone();
        let flag = if outcome.task.completed {
            Event::TaskCompleted { task_id, at }
        } else {
            Event::TaskReopened { task_id, at }
        };
        self.commit(
            before,
            [
                flag,
                Event::PointsChanged {
                    delta: outcome.delta,
                    points: outcome.points,
                    at,
                },
            ],
        )?;
        Ok(outcome)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let before = self.state.clone();
        let task = self.state.delete_task(id)?;
        self.commit(
            before,
            [Event::TaskDeleted {
                task_id: task.id.clone(),
                at: Utc::now(),
            }],
        )?;
        Ok(task)
    }

    pub fn move_to_date(&mut self, id: &str, date: NaiveDate) -> Result<Task> {
        let from = self
            .state
            .task(id)
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))?
            .date;
        let before = self.state.clone();
        let task = self.state.move_to_date(id, date)?.clone();
        self.commit(
            before,
            [Event::TaskMoved {
                task_id: task.id.clone(),
                from,
                to: date,
                at: Utc::now(),
            }],
        )?;
        Ok(task)
    }

    pub fn log_invested_minutes(&mut self, id: &str, minutes: u32) -> Result<Task> {
        let before = self.state.clone();
        let task = self.state.log_invested_minutes(id, minutes)?.clone();
        self.commit(
            before,
            [Event::InvestedLogged {
                task_id: task.id.clone(),
                minutes,
                total_minutes: task.invested_minutes.unwrap_or(0),
                at: Utc::now(),
            }],
        )?;
        Ok(task)
    }

    pub fn assign(&mut self, id: &str, hour: u32, minute: u32) -> Result<Task> {
        let start_time = StartTime::new(hour, minute)?;
        let before = self.state.clone();
        let task = self.state.assign(id, hour, minute)?.clone();
        self.commit(
            before,
            [Event::TaskAssigned {
                task_id: task.id.clone(),
                start_time,
                duration_hours: task.effective_duration_hours(),
                at: Utc::now(),
            }],
        )?;
        Ok(task)
    }

    pub fn unassign(&mut self, id: &str) -> Result<Task> {
        let before = self.state.clone();
        let task = self.state.unassign(id)?.clone();
        self.commit(
            before,
            [Event::TaskUnassigned {
                task_id: task.id.clone(),
                at: Utc::now(),
            }],
        )?;
        Ok(task)
    }

    pub fn partition(&self, date: NaiveDate) -> DayPartition<'_> {
        self.state.partition(date, self.config.tasks.quick_threshold)
    }

    pub fn layout(&self, date: NaiveDate) -> Vec<HourRow<'_>> {
        let layout = TimelineLayout::new(&self.config.timeline);
        self.state
            .layout(date, &layout, self.config.tasks.quick_threshold)
    }
}

fn created(task: &Task) -> Event {
    Event::TaskCreated {
        task_id: task.id.clone(),
        title: task.title.clone(),
        date: task.date,
        at: Utc::now(),
    }
}
