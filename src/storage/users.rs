//! User storage.

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::{parse_timestamp, Database};
use crate::error::HabitsError;
use crate::model::{validate_email, validate_username, User, UserUpdate};

const USER_COLUMNS: &str = "id, username, email, is_active, created_at";

/// Storage for registered users.
pub struct UserStore<'a> {
    db: &'a Database,
}

impl<'a> UserStore<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a new, active user.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the username or email is taken, `InvalidInput`
    /// if either fails validation.
    pub fn register(&self, username: &str, email: &str) -> Result<User, HabitsError> {
        let username = validate_username(username)?;
        let email = validate_email(email)?;

        if self.find_by_username(&username)?.is_some() {
            return Err(HabitsError::Conflict("Username already registered".to_string()));
        }
        if self.find_by_email(&email)?.is_some() {
            return Err(HabitsError::Conflict("Email already registered".to_string()));
        }

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO users (username, email, is_active, created_at) VALUES (?1, ?2, 1, ?3)",
            params![username, email, Utc::now().to_rfc3339()],
        )
        .map_err(|e| HabitsError::from_sqlite(&e, "Failed to insert user", "Username or email already registered"))?;

        let id = conn.last_insert_rowid();
        info!(user_id = id, %username, "registered user");
        self.get(id)?
            .ok_or_else(|| HabitsError::Database(format!("User {id} vanished after insert")))
    }

    /// Get a user by ID.
    pub fn get(&self, id: i64) -> Result<Option<User>, HabitsError> {
        self.query_one(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"), id)
    }

    /// Get a user by username.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, HabitsError> {
        self.query_one(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            username,
        )
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, HabitsError> {
        self.query_one(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"), email)
    }

    /// Look a user up by numeric ID, or by username for any other key.
    ///
    /// Usernames are never numeric, so the two never overlap.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no user matches.
    pub fn resolve(&self, key: &str) -> Result<User, HabitsError> {
        let key = key.trim();
        let found = match key.parse::<i64>() {
            Ok(id) => self.get(id)?,
            Err(_) => self.find_by_username(key)?,
        };

        found.ok_or_else(|| HabitsError::NotFound("User not found".to_string()))
    }

    /// All users, oldest first.
    pub fn list(&self) -> Result<Vec<User>, HabitsError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .map_err(|e| HabitsError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_user)
            .map_err(|e| HabitsError::Database(format!("Failed to query users: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| HabitsError::Database(e.to_string()))
    }

    /// Change a user's username and/or email.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user and `Conflict` if the new
    /// username or email belongs to someone else.
    pub fn update(&self, id: i64, update: UserUpdate) -> Result<User, HabitsError> {
        let mut user = self
            .get(id)?
            .ok_or_else(|| HabitsError::NotFound("User not found".to_string()))?;

        if let Some(username) = update.username {
            let username = validate_username(&username)?;
            if self.find_by_username(&username)?.is_some_and(|other| other.id != id) {
                return Err(HabitsError::Conflict("Username already registered".to_string()));
            }
            user.username = username;
        }

        if let Some(email) = update.email {
            let email = validate_email(&email)?;
            if self.find_by_email(&email)?.is_some_and(|other| other.id != id) {
                return Err(HabitsError::Conflict("Email already registered".to_string()));
            }
            user.email = email;
        }

        self.db
            .connection()
            .execute(
                "UPDATE users SET username = ?1, email = ?2 WHERE id = ?3",
                params![user.username, user.email, id],
            )
            .map_err(|e| HabitsError::from_sqlite(&e, "Failed to update user", "Username or email already registered"))?;

        debug!(user_id = id, "updated user");
        Ok(user)
    }

    /// Delete a user together with their habits and completions.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the user does not exist.
    pub fn delete(&self, id: i64) -> Result<User, HabitsError> {
        let user = self
            .get(id)?
            .ok_or_else(|| HabitsError::NotFound("User not found".to_string()))?;

        self.db
            .connection()
            .execute("DELETE FROM users WHERE id = ?1", [id])
            .map_err(|e| HabitsError::Database(format!("Failed to delete user: {e}")))?;

        info!(user_id = id, "deleted user");
        Ok(user)
    }

    fn query_one<P: rusqlite::ToSql>(&self, sql: &str, param: P) -> Result<Option<User>, HabitsError> {
        self.db
            .connection()
            .query_row(sql, [param], row_to_user)
            .optional()
            .map_err(|e| HabitsError::Database(format!("Failed to query user: {e}")))
    }
}

fn row_to_user(row: &Row<'_>) -> Result<User, rusqlite::Error> {
    let created_at: String = row.get(4)?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        is_active: row.get(3)?,
        created_at: parse_timestamp(4, &created_at)?,
    })
}
