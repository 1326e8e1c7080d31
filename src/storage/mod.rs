//! Storage layer for habits.
//!
//! `SQLite`-backed persistence for users, habits and completions. Each store
//! borrows the single [`Database`] opened for the process.

mod completions;
mod database;
mod habits;
mod migrations;
mod users;

pub use completions::CompletionStore;
pub use database::Database;
pub use habits::HabitStore;
pub use users::UserStore;

use chrono::{DateTime, Utc};

/// Parse an RFC 3339 timestamp column.
fn parse_timestamp(column: usize, value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
        })
}
