//! Date expression parsing.
//!
//! Habit completions are logged for today or some day in the past, so every
//! relative expression here resolves backwards from a given reference date.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::HabitsError;

/// Parse a date expression relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`
/// - `3 days ago`, `2 weeks ago`, `-3` (days back)
/// - `monday`, `mon` (most recent, today included), `last monday` (strictly before today)
/// - `mar 3`, `march 3` (most recent occurrence, today included)
/// - `2024-12-15` (ISO format)
///
/// Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_date_expr(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" | "now" => return Some(today),
        "yesterday" => return today.checked_sub_days(Days::new(1)),
        _ => {},
    }

    if let Ok(date) = NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
        return Some(date);
    }

    if let Some(rest) = input.strip_prefix('-') {
        let days: u64 = rest.trim().parse().ok()?;
        return today.checked_sub_days(Days::new(days));
    }

    parse_ago(&input, today)
        .or_else(|| parse_weekday(&input, today))
        .or_else(|| parse_month_day(&input, today))
}

/// Resolve an optional `--date` style argument, defaulting to `today`.
///
/// # Errors
///
/// Returns `InvalidInput` if the expression cannot be parsed.
pub fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, HabitsError> {
    match input {
        None => Ok(today),
        Some(expr) => parse_date_expr(expr, today).ok_or_else(|| {
            HabitsError::InvalidInput(format!(
                "could not understand date '{expr}' (try 'today', 'yesterday', '3 days ago' or YYYY-MM-DD)"
            ))
        }),
    }
}

/// Parse "N days/weeks ago".
fn parse_ago(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 3 || parts[2] != "ago" {
        return None;
    }

    let amount: u64 = parts[0].parse().ok()?;
    let unit = parts[1].trim_end_matches('s');
    let days = match unit {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        _ => return None,
    };

    today.checked_sub_days(Days::new(days))
}

/// Parse weekday names, resolving to the most recent such day.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (strictly_before, day_str) = input
        .strip_prefix("last ")
        .map_or((false, input), |rest| (true, rest));

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_back = (i64::from(today.weekday().num_days_from_monday())
        - i64::from(target.num_days_from_monday())
        + 7)
        % 7;

    if days_back == 0 && strictly_before {
        days_back = 7;
    }

    today.checked_sub_days(Days::new(u64::try_from(days_back).ok()?))
}

/// Parse "mar 3" / "march 3", picking this year or last so the date is not in the future.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let month = parse_month_name(parts[0])?;
    let day: u32 = parts[1].parse().ok()?;

    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(date) if date <= today => Some(date),
        _ => NaiveDate::from_ymd_opt(today.year() - 1, month, day),
    }
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A Wednesday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_today_and_yesterday() {
        assert_eq!(parse_date_expr("today", today()), Some(today()));
        assert_eq!(parse_date_expr(" Yesterday ", today()), Some(date(2024, 3, 12)));
    }

    #[test]
    fn test_parse_ago() {
        assert_eq!(parse_date_expr("3 days ago", today()), Some(date(2024, 3, 10)));
        assert_eq!(parse_date_expr("1 day ago", today()), Some(date(2024, 3, 12)));
        assert_eq!(parse_date_expr("2 weeks ago", today()), Some(date(2024, 2, 28)));
        assert_eq!(parse_date_expr("-5", today()), Some(date(2024, 3, 8)));
        assert_eq!(parse_date_expr("3 fortnights ago", today()), None);
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_date_expr("monday", today()), Some(date(2024, 3, 11)));
        assert_eq!(parse_date_expr("wed", today()), Some(today()));
        assert_eq!(parse_date_expr("last wednesday", today()), Some(date(2024, 3, 6)));
        assert_eq!(parse_date_expr("thu", today()), Some(date(2024, 3, 7)));
    }

    #[test]
    fn test_parse_month_day() {
        assert_eq!(parse_date_expr("mar 1", today()), Some(date(2024, 3, 1)));
        assert_eq!(parse_date_expr("december 25", today()), Some(date(2023, 12, 25)));
        assert_eq!(parse_date_expr("feb 30", today()), None);
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date_expr("2024-12-15", today()), Some(date(2024, 12, 15)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date_expr("someday", today()), None);
        assert!(matches!(
            resolve_date(Some("someday"), today()),
            Err(HabitsError::InvalidInput(_))
        ));
        assert_eq!(resolve_date(None, today()).unwrap(), today());
    }
}
