//! Output formatting for habits.
//!
//! Every formatter comes in a pretty (colored terminal) and a JSON flavour;
//! the functions here pick one based on the requested [`OutputFormat`].

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::cli::args::OutputFormat;
use crate::error::HabitsError;
use crate::model::{Completion, Habit, User};
use crate::stats::{HabitSummary, StreakStats};

pub use json::*;
pub use pretty::*;

/// Format users based on output format
///
/// # Errors
///
/// Returns `HabitsError::Json` if JSON serialization fails.
pub fn format_users(users: &[User], format: OutputFormat) -> Result<String, HabitsError> {
    match format {
        OutputFormat::Pretty => Ok(format_users_pretty(users)),
        OutputFormat::Json => format_users_json(users),
    }
}

/// Format a single user based on output format
///
/// # Errors
///
/// Returns `HabitsError::Json` if JSON serialization fails.
pub fn format_user(user: &User, format: OutputFormat) -> Result<String, HabitsError> {
    match format {
        OutputFormat::Pretty => Ok(format_user_pretty(user)),
        OutputFormat::Json => to_json(user),
    }
}

/// Format habits based on output format
///
/// # Errors
///
/// Returns `HabitsError::Json` if JSON serialization fails.
pub fn format_habits(habits: &[Habit], format: OutputFormat) -> Result<String, HabitsError> {
    match format {
        OutputFormat::Pretty => Ok(format_habits_pretty(habits)),
        OutputFormat::Json => format_habits_json(habits),
    }
}

/// Format a single habit based on output format
///
/// # Errors
///
/// Returns `HabitsError::Json` if JSON serialization fails.
pub fn format_habit(habit: &Habit, format: OutputFormat) -> Result<String, HabitsError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(habit)),
        OutputFormat::Json => to_json(habit),
    }
}

/// Format a completion history based on output format
///
/// # Errors
///
/// Returns `HabitsError::Json` if JSON serialization fails.
pub fn format_history(
    habit: &Habit,
    completions: &[Completion],
    format: OutputFormat,
) -> Result<String, HabitsError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(habit, completions)),
        OutputFormat::Json => format_history_json(habit, completions),
    }
}

/// Format one habit's statistics based on output format
///
/// `strip` is only used by the pretty renderer.
///
/// # Errors
///
/// Returns `HabitsError::Json` if JSON serialization fails.
pub fn format_stats(
    habit: &Habit,
    stats: &StreakStats,
    as_of: NaiveDate,
    strip: &str,
    format: OutputFormat,
) -> Result<String, HabitsError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(habit, stats, as_of, strip)),
        OutputFormat::Json => format_stats_json(habit, stats, as_of),
    }
}

/// Format the all-habits dashboard based on output format
///
/// # Errors
///
/// Returns `HabitsError::Json` if JSON serialization fails.
pub fn format_summaries(
    rows: &[HabitSummary],
    as_of: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitsError> {
    match format {
        OutputFormat::Pretty => Ok(format_summaries_pretty(rows, as_of)),
        OutputFormat::Json => format_summaries_json(rows, as_of),
    }
}
