mod config;
pub mod database;
pub mod memory;
pub mod migrations;

pub use config::{ClockConfig, Config, RewardsConfig, TaskConfig, TimelineConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::task::Task;

/// Everything the planner persists: the full task set and the points balance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub points: u32,
}

/// Persistence collaborator for the planner.
///
/// `load` runs once at startup; `save` runs after every mutating command
/// and receives the complete task set, never a delta.
pub trait PlannerStore {
    fn load(&mut self) -> Result<Snapshot>;
    fn save(&mut self, tasks: &[Task], points: u32) -> Result<()>;
}

impl<S: PlannerStore + ?Sized> PlannerStore for Box<S> {
    fn load(&mut self) -> Result<Snapshot> {
        (**self).load()
    }

    fn save(&mut self, tasks: &[Task], points: u32) -> Result<()> {
        (**self).save(tasks, points)
    }
}

/// Returns `~/.config/dayboard[-dev]/` based on DAYBOARD_ENV.
///
/// Set DAYBOARD_ENV=dev to use the development data directory, or
/// DAYBOARD_DATA_DIR to point at an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("DAYBOARD_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYBOARD_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("dayboard-dev")
            } else {
                base_dir.join("dayboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
