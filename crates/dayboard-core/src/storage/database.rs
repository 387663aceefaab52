//! SQLite-backed planner store.
//!
//! Provides persistent storage for:
//! - The full task set (one row per task, flush-ordered by `position`)
//! - Key-value store for planner state such as the points balance

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, migrations, PlannerStore, Snapshot};
use crate::error::{DatabaseError, Result};
use crate::task::{Priority, StartTime, Task, TaskKind};

const POINTS_KEY: &str = "points";

/// Raw column values before they are validated into a [`Task`].
struct TaskRow {
    id: String,
    title: String,
    completed: bool,
    date: String,
    priority: String,
    estimated_minutes: Option<u32>,
    start_time: Option<String>,
    kind: String,
    sort_order: u32,
    created_at: String,
    duration_hours: Option<f64>,
    invested_minutes: Option<u32>,
    description: Option<String>,
    tags: String,
}

impl TaskRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            completed: row.get(2)?,
            date: row.get(3)?,
            priority: row.get(4)?,
            estimated_minutes: row.get(5)?,
            start_time: row.get(6)?,
            kind: row.get(7)?,
            sort_order: row.get(8)?,
            created_at: row.get(9)?,
            duration_hours: row.get(10)?,
            invested_minutes: row.get(11)?,
            description: row.get(12)?,
            tags: row.get(13)?,
        })
    }

    /// Convert into a task. Only an unreadable `date` is fatal; other
    /// malformed fields fall back to defaults with a warning.
    fn into_task(self) -> Result<Task, DatabaseError> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|e| {
            DatabaseError::CorruptRow {
                id: self.id.clone(),
                message: format!("date '{}': {e}", self.date),
            }
        })?;

        let priority = self.priority.parse::<Priority>().unwrap_or_else(|e| {
            tracing::warn!(task_id = %self.id, error = %e, "defaulting priority");
            Priority::default()
        });
        let kind = self.kind.parse::<TaskKind>().unwrap_or_else(|e| {
            tracing::warn!(task_id = %self.id, error = %e, "defaulting task kind");
            TaskKind::default()
        });
        let start_time = self.start_time.as_deref().and_then(|raw| {
            raw.parse::<StartTime>()
                .map_err(|e| tracing::warn!(task_id = %self.id, error = %e, "dropping start time"))
                .ok()
        });
        let tags: Vec<String> = serde_json::from_str(&self.tags).unwrap_or_else(|e| {
            tracing::warn!(task_id = %self.id, error = %e, "dropping unreadable tags");
            Vec::new()
        });
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            tags,
            completed: self.completed,
            date,
            priority,
            estimated_minutes: self.estimated_minutes,
            invested_minutes: self.invested_minutes,
            start_time,
            duration_hours: self.duration_hours,
            kind,
            order: self.sort_order,
            created_at,
        })
    }
}

/// SQLite database holding the planner's tasks and points.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/dayboard/dayboard.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("dayboard.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, completed, date, priority, estimated_minutes, start_time,
                    kind, sort_order, created_at, duration_hours, invested_minutes,
                    description, tags
             FROM tasks
             ORDER BY position, rowid",
        )?;
        let rows = stmt
            .query_map([], TaskRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in rows {
            tasks.push(row.into_task()?);
        }
        Ok(tasks)
    }
}

impl PlannerStore for SqliteStore {
    fn load(&mut self) -> Result<Snapshot> {
        let tasks = self.list_tasks()?;
        let points = match self.kv_get(POINTS_KEY)? {
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|e| {
                tracing::warn!(value = %raw, error = %e, "resetting unreadable points balance");
                0
            }),
            None => 0,
        };
        tracing::debug!(tasks = tasks.len(), points, "loaded planner snapshot");
        Ok(Snapshot { tasks, points })
    }

    /// Replace the stored task set and points in one transaction.
    fn save(&mut self, tasks: &[Task], points: u32) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM tasks", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO tasks (
                    id, title, completed, date, priority, estimated_minutes, start_time,
                    kind, sort_order, created_at, duration_hours, invested_minutes,
                    description, tags, position
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                let tags_json = serde_json::to_string(&task.tags)?;
                insert.execute(params![
                    task.id,
                    task.title,
                    task.completed,
                    task.date.format("%Y-%m-%d").to_string(),
                    task.priority.as_str(),
                    task.estimated_minutes,
                    task.start_time.map(|t| t.to_string()),
                    task.kind.as_str(),
                    task.order,
                    task.created_at.to_rfc3339(),
                    task.duration_hours,
                    task.invested_minutes,
                    task.description,
                    tags_json,
                    position as i64,
                ])?;
            }
        }
        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![POINTS_KEY, points.to_string()],
        )?;
        tx.commit()?;
        tracing::debug!(tasks = tasks.len(), points, "flushed planner snapshot");
        Ok(())
    }
}
