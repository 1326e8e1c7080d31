//! `SQLite` database connection.
//!
//! The database lives at `~/.habits/habits.db` by default and holds the
//! `users`, `habits` and `completions` tables.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::HabitsError;

use super::migrations;

/// Database connection wrapper.
///
/// One value per process; stores borrow it and the connection is closed when
/// it is dropped.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &Path) -> Result<Self, HabitsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path).map_err(|e| {
            HabitsError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, HabitsError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            HabitsError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, HabitsError> {
        // Cascading deletes depend on this
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| HabitsError::Database(format!("Failed to enable foreign keys: {e}")))?;

        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, HabitsError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("habits.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
    }

    #[test]
    fn test_reopen_database() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("habits.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO users (username, email, created_at) VALUES ('ada', 'ada@example.com', '2024-01-01T00:00:00+00:00')",
                    [],
                )
                .unwrap();
        }

        // Reopen: migrations must not wipe existing rows
        {
            let db = Database::open_at(&db_path).unwrap();
            let count: i64 = db
                .connection()
                .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 1);
        }
    }
}
