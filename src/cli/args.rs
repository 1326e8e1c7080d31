use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "habits")]
#[command(about = "Track daily habits, streaks and completion rates from the command line")]
#[command(long_about = "habits - a habit tracker for the command line

Register a user, create habits, mark them done each day and watch your
streaks grow. Statistics are computed fresh from your completion history.

QUICK START:
  habits user register ada --email ada@example.com
  habits habit add \"Read 20 pages\"
  habits done 1                 Mark habit 1 done today
  habits done 1 --date yesterday
  habits stats                  Dashboard for all your habits
  habits stats 1                Streaks and 30-day rate for habit 1

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Act as this user (username or ID) instead of the configured one
    #[arg(short, long, global = true, env = "HABITS_USER")]
    pub user: Option<String>,

    /// Path to the database file
    #[arg(long, global = true, env = "HABITS_DB")]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage users
    ///
    /// Register users and choose which one is "you". Habits always belong
    /// to exactly one user.
    User(UserArgs),

    /// Manage habits
    ///
    /// Create, list, rename and delete the current user's habits.
    #[command(alias = "h")]
    Habit(HabitArgs),

    /// Mark a habit as done
    ///
    /// Records a completion for today, or for the day given with --date.
    /// A habit can be completed at most once per day.
    ///
    /// # Examples
    ///
    ///   habits done 1
    ///   habits done 1 --date yesterday
    ///   habits done 1 --date "3 days ago"
    ///   habits done 1 --date 2024-03-01
    #[command(alias = "d")]
    Done {
        /// Habit ID
        habit_id: i64,

        /// Day to record (default: today)
        #[arg(long, allow_hyphen_values = true)]
        date: Option<String>,
    },

    /// Remove a completion
    ///
    /// Undoes `habits done` for today, or for the day given with --date.
    Undo {
        /// Habit ID
        habit_id: i64,

        /// Day to clear (default: today)
        #[arg(long, allow_hyphen_values = true)]
        date: Option<String>,
    },

    /// Check whether a habit is done
    Check {
        /// Habit ID
        habit_id: i64,

        /// Day to check (default: today)
        #[arg(long, allow_hyphen_values = true)]
        date: Option<String>,
    },

    /// List every day a habit was completed, newest first
    History {
        /// Habit ID
        habit_id: i64,
    },

    /// Show the current streak of a habit
    Streak {
        /// Habit ID
        habit_id: i64,

        /// Compute as if today were this day
        #[arg(long, allow_hyphen_values = true)]
        as_of: Option<String>,
    },

    /// Show statistics
    ///
    /// With a habit ID: current streak, longest streak, total completions
    /// and the 30-day completion rate. Without: a dashboard row for every
    /// habit of the current user.
    ///
    /// # Examples
    ///
    ///   habits stats
    ///   habits stats 1
    ///   habits stats 1 --as-of 2024-03-01 -o json
    #[command(alias = "s")]
    Stats {
        /// Habit ID (omit for all habits)
        habit_id: Option<i64>,

        /// Compute as if today were this day
        #[arg(long, allow_hyphen_values = true)]
        as_of: Option<String>,
    },

    /// Show a calendar heatmap of a habit
    Heatmap {
        /// Habit ID
        habit_id: i64,

        /// Number of weeks to show (default: `stats.heatmap_weeks`)
        #[arg(long, short = 'w')]
        weeks: Option<usize>,

        /// Draw the calendar as if today were this day
        #[arg(long, allow_hyphen_values = true)]
        as_of: Option<String>,
    },

    /// Generate shell completion scripts
    ///
    /// # Examples
    ///
    ///   habits completions bash > ~/.local/share/bash-completion/completions/habits
    ///   habits completions zsh > ~/.zsh/completions/_habits
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for user management.
#[derive(Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommands,
}

/// User subcommands.
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user and make it the current one if none is set
    Register {
        /// Unique username
        username: String,

        /// Unique email address
        #[arg(long, short = 'e')]
        email: String,
    },

    /// List all users
    List,

    /// Show a user
    Show {
        /// Username or ID (default: current user)
        #[arg(value_name = "USER")]
        target: Option<String>,
    },

    /// Change a user's username or email
    Update {
        /// Username or ID
        #[arg(value_name = "USER")]
        target: String,

        /// New username
        #[arg(long)]
        username: Option<String>,

        /// New email address
        #[arg(long, short = 'e')]
        email: Option<String>,
    },

    /// Delete a user and all of their habits
    Delete {
        /// Username or ID
        #[arg(value_name = "USER")]
        target: String,
    },

    /// Make a user the current one
    Use {
        /// Username or ID
        #[arg(value_name = "USER")]
        target: String,
    },
}

/// Arguments for habit management.
#[derive(Args)]
pub struct HabitArgs {
    #[command(subcommand)]
    pub command: HabitCommands,
}

/// Habit subcommands.
#[derive(Subcommand)]
pub enum HabitCommands {
    /// Create a habit
    Add {
        /// Habit title
        title: String,

        /// Longer description
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// List your habits
    #[command(alias = "ls")]
    List,

    /// Show a habit
    Show {
        /// Habit ID
        id: i64,
    },

    /// Change a habit's title or description
    Edit {
        /// Habit ID
        id: i64,

        /// New title
        #[arg(long, short = 't')]
        title: Option<String>,

        /// New description (empty string clears it)
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Delete a habit and its history
    #[command(alias = "rm")]
    Delete {
        /// Habit ID
        id: i64,
    },
}
