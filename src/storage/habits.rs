//! Habit storage.
//!
//! Every lookup that acts on behalf of a user goes through
//! [`HabitStore::get_owned`], so a habit belonging to someone else is
//! indistinguishable from one that does not exist.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{parse_timestamp, Database};
use crate::error::HabitsError;
use crate::model::{validate_title, Habit, HabitUpdate};

const HABIT_COLUMNS: &str = "id, owner_id, title, description, created_at";

/// Storage for habits.
pub struct HabitStore<'a> {
    db: &'a Database,
}

impl<'a> HabitStore<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a habit owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title.
    pub fn create(
        &self,
        owner_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Habit, HabitsError> {
        let title = validate_title(title)?;
        let description = normalize_description(description);

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO habits (owner_id, title, description, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![owner_id, title, description, Utc::now().to_rfc3339()],
        )
        .map_err(|e| HabitsError::Database(format!("Failed to insert habit: {e}")))?;

        let id = conn.last_insert_rowid();
        info!(habit_id = id, owner_id, "created habit");
        self.get(id)?
            .ok_or_else(|| HabitsError::Database(format!("Habit {id} vanished after insert")))
    }

    /// Get a habit by ID, whoever owns it.
    pub fn get(&self, id: i64) -> Result<Option<Habit>, HabitsError> {
        self.db
            .connection()
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits WHERE id = ?1"),
                [id],
                row_to_habit,
            )
            .optional()
            .map_err(|e| HabitsError::Database(format!("Failed to query habit: {e}")))
    }

    /// Get a habit only if `owner_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the habit does not exist or belongs to another user.
    pub fn get_owned(&self, id: i64, owner_id: i64) -> Result<Habit, HabitsError> {
        match self.get(id)? {
            Some(habit) if habit.owner_id == owner_id => Ok(habit),
            Some(_) => {
                debug!(habit_id = id, owner_id, "habit belongs to another user");
                Err(HabitsError::NotFound("Habit not found".to_string()))
            }
            None => Err(HabitsError::NotFound("Habit not found".to_string())),
        }
    }

    /// Habits owned by `owner_id`, oldest first.
    pub fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Habit>, HabitsError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {HABIT_COLUMNS} FROM habits WHERE owner_id = ?1 ORDER BY id"
            ))
            .map_err(|e| HabitsError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([owner_id], row_to_habit)
            .map_err(|e| HabitsError::Database(format!("Failed to query habits: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| HabitsError::Database(e.to_string()))
    }

    /// Change a habit's title and/or description.
    ///
    /// An empty description clears it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the habit is not owned by `owner_id`.
    pub fn update(&self, id: i64, owner_id: i64, update: HabitUpdate) -> Result<Habit, HabitsError> {
        let mut habit = self.get_owned(id, owner_id)?;

        if let Some(title) = update.title {
            habit.title = validate_title(&title)?;
        }
        if let Some(description) = update.description {
            habit.description = normalize_description(Some(&description));
        }

        self.db
            .connection()
            .execute(
                "UPDATE habits SET title = ?1, description = ?2 WHERE id = ?3",
                params![habit.title, habit.description, id],
            )
            .map_err(|e| HabitsError::Database(format!("Failed to update habit: {e}")))?;

        debug!(habit_id = id, "updated habit");
        Ok(habit)
    }

    /// Delete a habit and its completions, returning what was deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the habit is not owned by `owner_id`.
    pub fn delete(&self, id: i64, owner_id: i64) -> Result<Habit, HabitsError> {
        let habit = self.get_owned(id, owner_id)?;

        self.db
            .connection()
            .execute("DELETE FROM habits WHERE id = ?1", [id])
            .map_err(|e| HabitsError::Database(format!("Failed to delete habit: {e}")))?;

        info!(habit_id = id, "deleted habit");
        Ok(habit)
    }
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(ToString::to_string)
}

fn row_to_habit(row: &Row<'_>) -> Result<Habit, rusqlite::Error> {
    let created_at: String = row.get(4)?;

    Ok(Habit {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        created_at: parse_timestamp(4, &created_at)?,
    })
}
