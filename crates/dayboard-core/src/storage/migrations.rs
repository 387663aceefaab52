//! Database schema migrations for dayboard.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: tasks and key-value tables.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS tasks (
            id                TEXT PRIMARY KEY,
            title             TEXT NOT NULL,
            completed         INTEGER NOT NULL DEFAULT 0,
            date              TEXT NOT NULL,
            priority          TEXT NOT NULL DEFAULT 'medium',
            estimated_minutes INTEGER,
            start_time        TEXT,
            kind              TEXT NOT NULL DEFAULT 'normal',
            sort_order        INTEGER NOT NULL DEFAULT 0,
            created_at        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_date ON tasks(date);",
    )?;

    set_schema_version(&tx, 1)?;
    tx.commit()?;
    Ok(())
}

/// Migration v2: timeline duration, time tracking and free-form fields.
///
/// Adds:
/// - duration_hours: explicit timeline duration
/// - invested_minutes: time actually spent
/// - description / tags (JSON array)
/// - position: flush position, keeps store insertion order across dates
///
/// Backfills `position` from `rowid` so existing rows keep their order.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "ALTER TABLE tasks ADD COLUMN duration_hours REAL;
         ALTER TABLE tasks ADD COLUMN invested_minutes INTEGER;
         ALTER TABLE tasks ADD COLUMN description TEXT;
         ALTER TABLE tasks ADD COLUMN tags TEXT NOT NULL DEFAULT '[]';
         ALTER TABLE tasks ADD COLUMN position INTEGER NOT NULL DEFAULT 0;",
    )?;

    tx.execute("UPDATE tasks SET position = rowid", [])?;

    set_schema_version(&tx, 2)?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM pragma_table_info('tasks')")
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);
        let columns = column_names(&conn);
        for expected in [
            "id",
            "date",
            "start_time",
            "duration_hours",
            "invested_minutes",
            "tags",
            "position",
        ] {
            assert!(columns.iter().any(|c| c == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), SCHEMA_VERSION);
    }

    #[test]
    fn test_incremental_migration_preserves_rows() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema_version_table(&conn).unwrap();
        migrate_v1(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), 1);

        conn.execute(
            "INSERT INTO tasks (id, title, date, created_at)
             VALUES ('a', 'First', '2026-03-14', '2026-03-14T08:00:00+00:00'),
                    ('b', 'Second', '2026-03-14', '2026-03-14T08:01:00+00:00')",
            [],
        )
        .unwrap();

        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn), 2);

        let positions: Vec<(String, i64)> = conn
            .prepare("SELECT id, position FROM tasks ORDER BY position")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(positions[0].0, "a");
        assert_eq!(positions[1].0, "b");
        assert!(positions[0].1 < positions[1].1);
    }
}
