//! Command implementations for habits.
//!
//! Every handler takes the per-invocation [`Context`] and returns the text to
//! print.

mod completions;
mod habit;
mod stats;
mod track;
mod user;

pub use completions::completions;
pub use habit::habit;
pub use stats::{heatmap, stats, streak};
pub use track::{check, done, history, undo};
pub use user::user;

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::debug;

use crate::cli::args::{Commands, OutputFormat};
use crate::config::Config;
use crate::error::HabitsError;
use crate::model::User;
use crate::storage::{Database, UserStore};

/// Everything a command needs for one invocation.
pub struct Context {
    pub db: Database,
    pub config: Config,
    /// Where `config` was loaded from, for commands that change it.
    pub config_path: PathBuf,
    /// `--user` / `HABITS_USER`, which wins over the configured user.
    pub user_override: Option<String>,
    pub format: OutputFormat,
    /// The caller's "today", resolved once per invocation.
    pub today: NaiveDate,
}

impl Context {
    /// Resolve the acting user.
    ///
    /// # Errors
    ///
    /// Returns `NoIdentity` if no user is selected, `NotFound` if the selected
    /// user does not exist.
    pub fn current_user(&self) -> Result<User, HabitsError> {
        let key = self
            .user_override
            .as_deref()
            .or(self.config.user.current.as_deref())
            .ok_or(HabitsError::NoIdentity)?;

        let user = UserStore::new(&self.db).resolve(key)?;
        debug!(user_id = user.id, username = %user.username, "resolved current user");
        Ok(user)
    }

    /// Persist the current config to `config_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_config(&self) -> Result<(), HabitsError> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.config.save_to_path(&self.config_path)
    }
}

/// Run one parsed command.
///
/// # Errors
///
/// Returns whatever the command handler returns.
pub fn dispatch(ctx: &mut Context, command: Commands) -> Result<String, HabitsError> {
    match command {
        Commands::User(args) => user(ctx, args.command),
        Commands::Habit(args) => habit(ctx, args.command),
        Commands::Done { habit_id, date } => done(ctx, habit_id, date.as_deref()),
        Commands::Undo { habit_id, date } => undo(ctx, habit_id, date.as_deref()),
        Commands::Check { habit_id, date } => check(ctx, habit_id, date.as_deref()),
        Commands::History { habit_id } => history(ctx, habit_id),
        Commands::Streak { habit_id, as_of } => streak(ctx, habit_id, as_of.as_deref()),
        Commands::Stats { habit_id, as_of } => stats(ctx, habit_id, as_of.as_deref()),
        Commands::Heatmap {
            habit_id,
            weeks,
            as_of,
        } => heatmap(ctx, habit_id, weeks, as_of.as_deref()),
        Commands::Completions { shell } => completions(shell),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()
    }

    /// A context over an in-memory database with one registered user, "ada".
    pub fn context(format: OutputFormat) -> (Context, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        UserStore::new(&db).register("ada", "ada@example.com").unwrap();

        let mut config = Config::default();
        config.user.current = Some("ada".to_string());

        let ctx = Context {
            db,
            config,
            config_path: dir.path().join("config.yaml"),
            user_override: None,
            format,
            today: today(),
        };
        (ctx, dir)
    }
}
