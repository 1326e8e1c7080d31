//! Recording and inspecting completions.

use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::core::resolve_date;
use crate::error::HabitsError;
use crate::model::Habit;
use crate::output::{format_history, to_json};
use crate::stats::current_streak_for;
use crate::storage::{CompletionStore, HabitStore};

fn owned_habit(ctx: &Context, habit_id: i64) -> Result<Habit, HabitsError> {
    let owner = ctx.current_user()?;
    HabitStore::new(&ctx.db).get_owned(habit_id, owner.id)
}

/// Mark a habit done on `date` (default today).
///
/// # Errors
///
/// Returns `Conflict` if already completed that day, `InvalidInput` for an
/// unparseable or future date, `NotFound` for someone else's habit.
pub fn done(ctx: &Context, habit_id: i64, date: Option<&str>) -> Result<String, HabitsError> {
    let habit = owned_habit(ctx, habit_id)?;
    let date = resolve_date(date, ctx.today)?;

    if date > ctx.today {
        return Err(HabitsError::InvalidInput(format!(
            "{date} is in the future; habits can only be completed up to today"
        )));
    }

    let store = CompletionStore::new(&ctx.db);
    let completion = store.complete(habit.id, date)?;
    let streak = current_streak_for(&store, habit.id, ctx.today)?;

    match ctx.format {
        OutputFormat::Json => to_json(&json!({
            "message": "Completed",
            "completion": completion,
            "current_streak": streak,
        })),
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {} done for {}",
                "✓".green(),
                habit.title.bold(),
                date.format("%a %Y-%m-%d")
            );
            if streak > 0 {
                output.push_str(&format!("  🔥 {}", format!("{streak} day streak").green()));
            }
            Ok(output)
        }
    }
}

/// Remove the completion on `date` (default today).
///
/// # Errors
///
/// Returns `NotFound` if there is no completion that day.
pub fn undo(ctx: &Context, habit_id: i64, date: Option<&str>) -> Result<String, HabitsError> {
    let habit = owned_habit(ctx, habit_id)?;
    let date = resolve_date(date, ctx.today)?;

    let removed = CompletionStore::new(&ctx.db).uncomplete(habit.id, date)?;

    match ctx.format {
        OutputFormat::Json => to_json(&json!({
            "message": "Completion removed",
            "completion": removed,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} Removed completion of {} on {}",
            "✓".green(),
            habit.title.bold(),
            date.format("%a %Y-%m-%d")
        )),
    }
}

/// Whether the habit is done on `date` (default today).
///
/// # Errors
///
/// Returns `NotFound` for someone else's habit.
pub fn check(ctx: &Context, habit_id: i64, date: Option<&str>) -> Result<String, HabitsError> {
    let habit = owned_habit(ctx, habit_id)?;
    let date = resolve_date(date, ctx.today)?;
    let completed = CompletionStore::new(&ctx.db).is_completed(habit.id, date)?;

    match ctx.format {
        OutputFormat::Json => to_json(&json!({
            "habit_id": habit.id,
            "date": date,
            "completed": completed,
        })),
        OutputFormat::Pretty => Ok(if completed {
            format!("{} {} is done for {date}", "[x]".green(), habit.title.bold())
        } else {
            format!("{} {} is not done for {date}", "[ ]".white(), habit.title.bold())
        }),
    }
}

/// All completion dates of a habit, newest first.
///
/// # Errors
///
/// Returns `NotFound` for someone else's habit.
pub fn history(ctx: &Context, habit_id: i64) -> Result<String, HabitsError> {
    let habit = owned_habit(ctx, habit_id)?;
    let completions = CompletionStore::new(&ctx.db).list(habit.id)?;
    format_history(&habit, &completions, ctx.format)
}
