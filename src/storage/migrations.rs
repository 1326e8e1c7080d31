//! Database migrations for habits.
//!
//! Each migration upgrades the schema by one version and runs automatically
//! when the database is opened. The version is kept in `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::info;

use crate::error::HabitsError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, HabitsError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| HabitsError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), HabitsError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| HabitsError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), HabitsError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        info!(version, "applying schema migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), HabitsError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(HabitsError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: users, habits and one completion row per habit per day.
fn migrate_v1(conn: &Connection) -> Result<(), HabitsError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS habits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_habits_owner
        ON habits(owner_id);

        CREATE TABLE IF NOT EXISTS completions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id INTEGER NOT NULL REFERENCES habits(id) ON DELETE CASCADE,
            date TEXT NOT NULL,
            UNIQUE (habit_id, date)
        );
        ",
    )
    .map_err(|e| HabitsError::Database(format!("Migration v1 failed: {e}")))
}
