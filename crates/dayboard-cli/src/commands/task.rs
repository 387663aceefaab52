//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use dayboard_core::task::QUICK_PRESETS;
use dayboard_core::{Priority, QuickPreset, StartTime, TaskDraft};
use serde_json::json;

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Day the task belongs to (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Estimated minutes (default from config)
        #[arg(long)]
        estimate: Option<u32>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Tag, may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Add a built-in routine (water, walk, breathe, messages, coffee, snack)
    Quick {
        preset: String,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List a day's tasks
    List {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Group into scheduled, quick and unplaced tasks
        #[arg(long)]
        partition: bool,
    },
    /// Toggle completion
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Move a task to another day
    Move {
        /// Task ID
        id: String,
        /// Target day (YYYY-MM-DD)
        date: NaiveDate,
    },
    /// Place a task on the timeline
    Assign {
        /// Task ID
        id: String,
        /// Start time (HH:MM)
        at: StartTime,
    },
    /// Take a task off the timeline
    Unassign {
        /// Task ID
        id: String,
    },
    /// Log minutes worked on a task
    Log {
        /// Task ID
        id: String,
        minutes: u32,
    },
}

pub fn run(action: TaskAction) -> CmdResult {
    let mut planner = open_planner(None)?;
    let today = planner.state().selected_date();

    match action {
        TaskAction::Add {
            title,
            date,
            priority,
            estimate,
            description,
            tags,
        } => {
            let mut draft = TaskDraft::new(title).with_priority(priority);
            draft.estimated_minutes = estimate;
            draft.description = description;
            draft.tags = tags;
            let task = planner.create_task(draft, date.unwrap_or(today))?;
            print_json(&task)?;
        }
        TaskAction::Quick { preset, date } => {
            let Some(preset) = QuickPreset::find(&preset) else {
                let keys: Vec<&str> = QUICK_PRESETS.iter().map(|p| p.key).collect();
                return Err(
                    format!("unknown preset '{preset}' (one of: {})", keys.join(", ")).into(),
                );
            };
            let task = planner.add_quick_task(preset, date.unwrap_or(today))?;
            print_json(&task)?;
        }
        TaskAction::List { date, partition } => {
            let date = date.unwrap_or(today);
            if partition {
                let day = planner.partition(date);
                print_json(&json!({
                    "date": date,
                    "scheduled": day.scheduled,
                    "unscheduled": day.unscheduled,
                    "unplaced": day.unplaced,
                }))?;
            } else {
                print_json(&planner.state().sorted_for_display(date))?;
            }
        }
        TaskAction::Toggle { id } => {
            let outcome = planner.toggle_completed(&id)?;
            print_json(&outcome)?;
        }
        TaskAction::Delete { id } => {
            let task = planner.delete_task(&id)?;
            println!("Task deleted: {}", task.id);
        }
        TaskAction::Move { id, date } => {
            let task = planner.move_to_date(&id, date)?;
            print_json(&task)?;
        }
        TaskAction::Assign { id, at } => {
            let task = planner.assign(&id, at.hour(), at.minute())?;
            for other in planner.state().overlapping(&task.id) {
                eprintln!("warning: overlaps '{}' ({})", other.title, other.id);
            }
            print_json(&task)?;
        }
        TaskAction::Unassign { id } => {
            let task = planner.unassign(&id)?;
            print_json(&task)?;
        }
        TaskAction::Log { id, minutes } => {
            let task = planner.log_invested_minutes(&id, minutes)?;
            print_json(&task)?;
        }
    }
    Ok(())
}
