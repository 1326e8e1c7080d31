//! Streak and completion statistics.
//!
//! - `engine`: pure calculations over a set of completion dates
//! - `report`: loads completions from storage and builds per-habit summaries
//! - `visualization`: terminal heatmaps and bars

pub mod engine;
pub mod report;
pub mod visualization;

pub use engine::{
    completion_rate_30_day, current_streak, longest_streak, total_completions, CompletionSet,
    StreakStats, RATE_WINDOW_DAYS,
};
pub use report::{current_streak_for, habit_stats, load_completions, summarize, HabitSummary};
pub use visualization::{
    render_heatmap, render_progress_bar, render_window_strip, MAX_HEATMAP_WEEKS,
};
