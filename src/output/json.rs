//! JSON output formatting for habits.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::error::HabitsError;
use crate::model::{Completion, Habit, User};
use crate::stats::{HabitSummary, StreakStats};

/// Format users as JSON
///
/// # Errors
///
/// Returns `HabitsError::Json` if serialization fails.
pub fn format_users_json(users: &[User]) -> Result<String, HabitsError> {
    let output = json!({
        "count": users.len(),
        "items": users
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format habits as JSON
///
/// # Errors
///
/// Returns `HabitsError::Json` if serialization fails.
pub fn format_habits_json(habits: &[Habit]) -> Result<String, HabitsError> {
    let output = json!({
        "count": habits.len(),
        "items": habits
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a habit's completion history as JSON
///
/// # Errors
///
/// Returns `HabitsError::Json` if serialization fails.
pub fn format_history_json(habit: &Habit, completions: &[Completion]) -> Result<String, HabitsError> {
    let dates: Vec<NaiveDate> = completions.iter().map(|c| c.date).collect();
    let output = json!({
        "habit_id": habit.id,
        "title": habit.title,
        "count": dates.len(),
        "dates": dates
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format one habit's statistics as JSON
///
/// # Errors
///
/// Returns `HabitsError::Json` if serialization fails.
pub fn format_stats_json(habit: &Habit, stats: &StreakStats, as_of: NaiveDate) -> Result<String, HabitsError> {
    let mut output = serde_json::to_value(stats)?;
    if let Some(map) = output.as_object_mut() {
        map.insert("habit_id".to_string(), json!(habit.id));
        map.insert("title".to_string(), json!(habit.title));
        map.insert("as_of".to_string(), json!(as_of));
    }
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format dashboard rows as JSON
///
/// # Errors
///
/// Returns `HabitsError::Json` if serialization fails.
pub fn format_summaries_json(rows: &[HabitSummary], as_of: NaiveDate) -> Result<String, HabitsError> {
    let output = json!({
        "as_of": as_of,
        "count": rows.len(),
        "items": rows
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `HabitsError::Json` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, HabitsError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_habit(title: &str) -> Habit {
        Habit {
            id: 7,
            owner_id: 1,
            title: title.to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_format_habits_json_empty_list() {
        let result = format_habits_json(&[]).unwrap();
        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_stats_json_uses_wire_names() {
        let stats = StreakStats {
            current_streak: 2,
            longest_streak: 5,
            total_completions: 9,
            completion_rate_30_day: 30,
        };
        let result = format_stats_json(&make_habit("Read"), &stats, day(10)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["habit_id"], 7);
        assert_eq!(value["title"], "Read");
        assert_eq!(value["as_of"], "2024-01-10");
        assert_eq!(value["current_streak"], 2);
        assert_eq!(value["longest_streak"], 5);
        assert_eq!(value["total_completions"], 9);
        assert_eq!(value["completion_rate_last_30_days"], 30);
    }

    #[test]
    fn test_format_history_json() {
        let completions = vec![
            Completion { id: 2, habit_id: 7, date: day(2) },
            Completion { id: 1, habit_id: 7, date: day(1) },
        ];
        let result = format_history_json(&make_habit("Read"), &completions).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["dates"][0], "2024-01-02");
    }
}
