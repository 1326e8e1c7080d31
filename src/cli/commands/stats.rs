//! Statistics command implementation.
//!
//! `streak`, `stats` and `heatmap` all accept `--as-of` so numbers can be
//! reproduced for any reference day.

use chrono::NaiveDate;
use colored::Colorize;
use serde_json::json;

use super::Context;
use crate::cli::args::OutputFormat;
use crate::core::resolve_date;
use crate::error::HabitsError;
use crate::output::{format_stats, format_summaries, to_json};
use crate::stats::engine::window_start;
use crate::stats::{
    current_streak_for, load_completions, render_heatmap, render_window_strip, summarize,
    StreakStats, MAX_HEATMAP_WEEKS, RATE_WINDOW_DAYS,
};
use crate::storage::{CompletionStore, HabitStore};

fn as_of_date(ctx: &Context, as_of: Option<&str>) -> Result<NaiveDate, HabitsError> {
    resolve_date(as_of, ctx.today)
}

/// Current streak of one habit.
///
/// # Errors
///
/// Returns `NotFound` for someone else's habit, `InvalidInput` for a bad
/// `--as-of`.
pub fn streak(ctx: &Context, habit_id: i64, as_of: Option<&str>) -> Result<String, HabitsError> {
    let owner = ctx.current_user()?;
    let habit = HabitStore::new(&ctx.db).get_owned(habit_id, owner.id)?;
    let as_of = as_of_date(ctx, as_of)?;

    let current = current_streak_for(&CompletionStore::new(&ctx.db), habit.id, as_of)?;

    match ctx.format {
        OutputFormat::Json => to_json(&json!({
            "habit_id": habit.id,
            "as_of": as_of,
            "current_streak": current,
        })),
        OutputFormat::Pretty => {
            let days = if current == 1 { "day" } else { "days" };
            let count = format!("{current} {days}");
            let count = if current > 0 {
                count.green().bold().to_string()
            } else {
                count.dimmed().to_string()
            };
            Ok(format!("🔥 {}: {count}", habit.title.bold()))
        }
    }
}

/// Statistics of one habit, or a dashboard row per habit when `habit_id` is
/// omitted.
///
/// # Errors
///
/// Returns `NotFound` for someone else's habit, `InvalidInput` for a bad
/// `--as-of`.
pub fn stats(
    ctx: &Context,
    habit_id: Option<i64>,
    as_of: Option<&str>,
) -> Result<String, HabitsError> {
    let owner = ctx.current_user()?;
    let habits = HabitStore::new(&ctx.db);
    let completions = CompletionStore::new(&ctx.db);
    let as_of = as_of_date(ctx, as_of)?;

    match habit_id {
        Some(id) => {
            let habit = habits.get_owned(id, owner.id)?;
            let set = load_completions(&completions, habit.id)?;
            let stats = StreakStats::compute(&set, as_of);
            let strip = render_window_strip(&set, as_of, RATE_WINDOW_DAYS);
            format_stats(&habit, &stats, as_of, &strip, ctx.format)
        }
        None => {
            let rows = summarize(&completions, habits.list_for_owner(owner.id)?, as_of)?;
            format_summaries(&rows, as_of, ctx.format)
        }
    }
}

/// Calendar heatmap of one habit.
///
/// # Errors
///
/// Returns `NotFound` for someone else's habit, `InvalidInput` for a bad
/// `--as-of` or a week count outside `1..=MAX_HEATMAP_WEEKS`.
pub fn heatmap(
    ctx: &Context,
    habit_id: i64,
    weeks: Option<usize>,
    as_of: Option<&str>,
) -> Result<String, HabitsError> {
    let owner = ctx.current_user()?;
    let habit = HabitStore::new(&ctx.db).get_owned(habit_id, owner.id)?;
    let as_of = as_of_date(ctx, as_of)?;

    let weeks = weeks.unwrap_or(ctx.config.stats.heatmap_weeks);
    if !(1..=MAX_HEATMAP_WEEKS).contains(&weeks) {
        return Err(HabitsError::InvalidInput(format!(
            "--weeks must be between 1 and {MAX_HEATMAP_WEEKS}, got {weeks}"
        )));
    }

    let set = load_completions(&CompletionStore::new(&ctx.db), habit.id)?;

    match ctx.format {
        OutputFormat::Json => {
            let span = u32::try_from(weeks.saturating_mul(7)).unwrap_or(u32::MAX);
            let from = window_start(as_of, span);
            let dates: Vec<NaiveDate> = set.iter().filter(|d| *d >= from && *d <= as_of).collect();
            to_json(&json!({
                "habit_id": habit.id,
                "from": from,
                "to": as_of,
                "weeks": weeks,
                "dates": dates,
            }))
        }
        OutputFormat::Pretty => Ok(format!(
            "📅 {}\n\n{}",
            habit.title.bold(),
            render_heatmap(&set, as_of, weeks)
        )),
    }
}
