//! Input records that become tasks: form drafts and quick-routine presets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Priority, Task, TaskKind};
use crate::error::PlannerError;
use crate::storage::TaskConfig;

/// User-entered fields for a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// Minutes; the configured default applies when absent
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_estimate(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Validate and turn the draft into a task for `date` at position `order`.
    ///
    /// The title is trimmed and must not be empty. The estimate is clamped
    /// to the configured bounds.
    pub fn into_task(
        self,
        date: NaiveDate,
        order: u32,
        config: &TaskConfig,
    ) -> Result<Task, PlannerError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }

        let estimate = self
            .estimated_minutes
            .unwrap_or(config.default_estimate);

        let mut task = Task::new(title, date);
        task.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        task.priority = self.priority;
        task.estimated_minutes = Some(config.clamp_estimate(estimate));
        task.invested_minutes = Some(0);
        task.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        task.order = order;
        Ok(task)
    }
}

/// A built-in one-tap routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPreset {
    /// Short key for lookups from the command line
    pub key: &'static str,
    pub title: &'static str,
    pub minutes: u32,
}

/// Routines offered in the quick-task pool.
pub const QUICK_PRESETS: &[QuickPreset] = &[
    QuickPreset {
        key: "water",
        title: "Drink water",
        minutes: 1,
    },
    QuickPreset {
        key: "walk",
        title: "Walk 5 min",
        minutes: 5,
    },
    QuickPreset {
        key: "breathe",
        title: "Breathe deeply",
        minutes: 2,
    },
    QuickPreset {
        key: "messages",
        title: "Check messages",
        minutes: 10,
    },
    QuickPreset {
        key: "coffee",
        title: "Coffee break",
        minutes: 15,
    },
    QuickPreset {
        key: "snack",
        title: "Healthy snack",
        minutes: 5,
    },
];

impl QuickPreset {
    pub fn find(key: &str) -> Option<&'static QuickPreset> {
        QUICK_PRESETS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
    }

    /// Materialize the preset as a simple routine on `date`.
    ///
    /// Presets skip the form clamp: a one-minute routine stays one minute.
    pub fn to_task(&self, date: NaiveDate, order: u32) -> Task {
        let mut task = Task::new(self.title, date);
        task.priority = Priority::Low;
        task.estimated_minutes = Some(self.minutes.max(1));
        task.invested_minutes = Some(0);
        task.kind = TaskKind::SimpleRoutine;
        task.order = order;
        task
    }
}
