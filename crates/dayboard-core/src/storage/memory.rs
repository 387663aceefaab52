//! In-process store for tests and embedding.

use super::{PlannerStore, Snapshot};
use crate::error::Result;
use crate::task::Task;

/// Keeps the last saved snapshot in memory and counts flushes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing data.
    pub fn with_snapshot(tasks: Vec<Task>, points: u32) -> Self {
        Self {
            snapshot: Snapshot { tasks, points },
            saves: 0,
        }
    }

    /// Last saved snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of `save` calls received.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl PlannerStore for MemoryStore {
    fn load(&mut self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, tasks: &[Task], points: u32) -> Result<()> {
        self.snapshot = Snapshot {
            tasks: tasks.to_vec(),
            points,
        };
        self.saves += 1;
        Ok(())
    }
}
