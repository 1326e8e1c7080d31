//! Domain records: users, habits and completions.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::HabitsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub id: i64,
    pub habit_id: i64,
    pub date: NaiveDate,
}

/// Fields to change on a user. `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Fields to change on a habit. `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct HabitUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

// Constant pattern, covered by `test_email_pattern_compiles`
#[allow(clippy::expect_used)]
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Trim and check a username.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty name, one containing whitespace, or
/// one that reads as a numeric user ID.
pub fn validate_username(name: &str) -> Result<String, HabitsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HabitsError::InvalidInput("username cannot be empty".to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(HabitsError::InvalidInput(format!(
            "username '{name}' cannot contain spaces"
        )));
    }
    // Numeric keys are looked up as IDs
    if name.parse::<i64>().is_ok() {
        return Err(HabitsError::InvalidInput(format!(
            "username '{name}' cannot be a number"
        )));
    }
    Ok(name.to_string())
}

/// Trim, lowercase and check the shape of an email address.
///
/// # Errors
///
/// Returns `InvalidInput` if the address does not look like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<String, HabitsError> {
    let email = email.trim().to_lowercase();
    if EMAIL_RE.is_match(&email) {
        Ok(email)
    } else {
        Err(HabitsError::InvalidInput(format!("'{email}' is not a valid email address")))
    }
}

/// Trim and check a habit title.
///
/// # Errors
///
/// Returns `InvalidInput` for a blank title.
pub fn validate_title(title: &str) -> Result<String, HabitsError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(HabitsError::InvalidInput("habit title cannot be empty".to_string()));
    }
    Ok(title.to_string())
}
