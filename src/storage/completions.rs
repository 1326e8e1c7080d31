//! Completion storage: at most one row per habit per calendar day.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::Database;
use crate::core::CompletionSource;
use crate::error::HabitsError;
use crate::model::Completion;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage for habit completions.
pub struct CompletionStore<'a> {
    db: &'a Database,
}

impl<'a> CompletionStore<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Mark `habit_id` as done on `date`.
    ///
    /// Ownership must already have been checked by the caller.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the habit is already completed on that date.
    pub fn complete(&self, habit_id: i64, date: NaiveDate) -> Result<Completion, HabitsError> {
        let conflict = format!("Already completed on {date}");
        if self.find(habit_id, date)?.is_some() {
            return Err(HabitsError::Conflict(conflict));
        }

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO completions (habit_id, date) VALUES (?1, ?2)",
            params![habit_id, date.format(DATE_FORMAT).to_string()],
        )
        .map_err(|e| HabitsError::from_sqlite(&e, "Failed to insert completion", &conflict))?;

        let id = conn.last_insert_rowid();
        info!(habit_id, %date, "recorded completion");
        Ok(Completion { id, habit_id, date })
    }

    /// Remove the completion of `habit_id` on `date`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if there is no completion on that date.
    pub fn uncomplete(&self, habit_id: i64, date: NaiveDate) -> Result<Completion, HabitsError> {
        let completion = self
            .find(habit_id, date)?
            .ok_or_else(|| HabitsError::NotFound(format!("No completion found for {date}")))?;

        self.db
            .connection()
            .execute("DELETE FROM completions WHERE id = ?1", [completion.id])
            .map_err(|e| HabitsError::Database(format!("Failed to delete completion: {e}")))?;

        info!(habit_id, %date, "removed completion");
        Ok(completion)
    }

    /// The completion of `habit_id` on `date`, if any.
    pub fn find(&self, habit_id: i64, date: NaiveDate) -> Result<Option<Completion>, HabitsError> {
        self.db
            .connection()
            .query_row(
                "SELECT id, habit_id, date FROM completions WHERE habit_id = ?1 AND date = ?2",
                params![habit_id, date.format(DATE_FORMAT).to_string()],
                row_to_completion,
            )
            .optional()
            .map_err(|e| HabitsError::Database(format!("Failed to query completion: {e}")))
    }

    /// Whether `habit_id` was completed on `date`.
    pub fn is_completed(&self, habit_id: i64, date: NaiveDate) -> Result<bool, HabitsError> {
        Ok(self.find(habit_id, date)?.is_some())
    }

    /// All completions of `habit_id`, newest first.
    pub fn list(&self, habit_id: i64) -> Result<Vec<Completion>, HabitsError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, habit_id, date FROM completions WHERE habit_id = ?1 ORDER BY date DESC",
            )
            .map_err(|e| HabitsError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([habit_id], row_to_completion)
            .map_err(|e| HabitsError::Database(format!("Failed to query completions: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| HabitsError::Database(e.to_string()))
    }
}

impl CompletionSource for CompletionStore<'_> {
    fn completion_dates(&self, habit_id: i64) -> Result<Vec<NaiveDate>, HabitsError> {
        let dates: Vec<NaiveDate> = self.list(habit_id)?.into_iter().map(|c| c.date).collect();
        debug!(habit_id, count = dates.len(), "loaded completion dates");
        Ok(dates)
    }
}

fn row_to_completion(row: &Row<'_>) -> Result<Completion, rusqlite::Error> {
    let date: String = row.get(2)?;
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Completion {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{HabitStore, UserStore};
    use chrono::Days;

    fn setup() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let habit_id = {
            let user = UserStore::new(&db).register("ada", "ada@example.com").unwrap();
            HabitStore::new(&db).create(user.id, "Read", None).unwrap().id
        };
        (db, habit_id)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_complete_once_per_day() {
        let (db, habit) = setup();
        let store = CompletionStore::new(&db);

        store.complete(habit, day(1)).unwrap();
        let err = store.complete(habit, day(1)).unwrap_err();
        assert!(matches!(err, HabitsError::Conflict(ref m) if m == "Already completed on 2024-05-01"));

        assert!(store.is_completed(habit, day(1)).unwrap());
        assert!(!store.is_completed(habit, day(2)).unwrap());
    }

    #[test]
    fn test_uncomplete() {
        let (db, habit) = setup();
        let store = CompletionStore::new(&db);

        let err = store.uncomplete(habit, day(3)).unwrap_err();
        assert!(matches!(err, HabitsError::NotFound(ref m) if m == "No completion found for 2024-05-03"));

        store.complete(habit, day(3)).unwrap();
        let removed = store.uncomplete(habit, day(3)).unwrap();
        assert_eq!(removed.date, day(3));
        assert!(!store.is_completed(habit, day(3)).unwrap());
    }

    #[test]
    fn test_list_newest_first() {
        let (db, habit) = setup();
        let store = CompletionStore::new(&db);
        for d in [4, 1, 9, 2] {
            store.complete(habit, day(d)).unwrap();
        }

        let dates: Vec<NaiveDate> = store.list(habit).unwrap().into_iter().map(|c| c.date).collect();
        assert_eq!(dates, vec![day(9), day(4), day(2), day(1)]);
    }

    #[test]
    fn test_completion_source_feeds_stats() {
        let (db, habit) = setup();
        let store = CompletionStore::new(&db);
        let today = day(20);
        for back in 0..5 {
            store.complete(habit, today - Days::new(back)).unwrap();
        }

        let stats = crate::stats::habit_stats(&store, habit, today).unwrap();
        assert_eq!(stats.current_streak, 5);
        assert_eq!(stats.longest_streak, 5);
        assert_eq!(stats.total_completions, 5);
        assert_eq!(stats.completion_rate_30_day, 17);
    }

    #[test]
    fn test_deleting_habit_cascades() {
        let (db, habit) = setup();
        let store = CompletionStore::new(&db);
        store.complete(habit, day(1)).unwrap();

        db.connection()
            .execute("DELETE FROM habits WHERE id = ?1", [habit])
            .unwrap();
        assert!(store.list(habit).unwrap().is_empty());
    }
}
