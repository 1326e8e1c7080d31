//! Stats service: fetches completions from a collaborator and runs the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::{current_streak, CompletionSet, StreakStats};
use crate::core::CompletionSource;
use crate::error::HabitsError;
use crate::model::Habit;

/// Load the completion set of one habit.
///
/// # Errors
///
/// Returns an error if the source cannot be read.
pub fn load_completions<S>(source: &S, habit_id: i64) -> Result<CompletionSet, HabitsError>
where
    S: CompletionSource + ?Sized,
{
    let dates = source.completion_dates(habit_id)?;
    let raw = dates.len();
    let set: CompletionSet = dates.into_iter().collect();

    if set.len() != raw {
        debug!(habit_id, raw, distinct = set.len(), "collapsed duplicate completion dates");
    }

    Ok(set)
}

/// Full statistics for one habit as of `today`.
///
/// # Errors
///
/// Returns an error if the source cannot be read.
pub fn habit_stats<S>(source: &S, habit_id: i64, today: NaiveDate) -> Result<StreakStats, HabitsError>
where
    S: CompletionSource + ?Sized,
{
    let set = load_completions(source, habit_id)?;
    Ok(StreakStats::compute(&set, today))
}

/// Current streak only, as of `today`.
///
/// # Errors
///
/// Returns an error if the source cannot be read.
pub fn current_streak_for<S>(source: &S, habit_id: i64, today: NaiveDate) -> Result<u32, HabitsError>
where
    S: CompletionSource + ?Sized,
{
    let set = load_completions(source, habit_id)?;
    Ok(current_streak(&set, today))
}

/// One dashboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitSummary {
    pub habit: Habit,
    #[serde(flatten)]
    pub stats: StreakStats,
    pub completed_today: bool,
    pub last_completion: Option<NaiveDate>,
    /// Days between the last completion and `today`; `None` if never done.
    pub days_since_completion: Option<i64>,
}

impl HabitSummary {
    /// Build a summary from an already loaded completion set.
    #[must_use]
    pub fn from_set(habit: Habit, set: &CompletionSet, today: NaiveDate) -> Self {
        let last_completion = set.iter().rev().find(|d| *d <= today);

        Self {
            habit,
            stats: StreakStats::compute(set, today),
            completed_today: set.contains(today),
            last_completion,
            days_since_completion: last_completion.map(|d| (today - d).num_days()),
        }
    }
}

/// Summaries for a list of habits, in the given order.
///
/// # Errors
///
/// Returns an error if the source cannot be read for any habit.
pub fn summarize<S>(
    source: &S,
    habits: Vec<Habit>,
    today: NaiveDate,
) -> Result<Vec<HabitSummary>, HabitsError>
where
    S: CompletionSource + ?Sized,
{
    habits
        .into_iter()
        .map(|habit| {
            let set = load_completions(source, habit.id)?;
            Ok(HabitSummary::from_set(habit, &set, today))
        })
        .collect()
}
