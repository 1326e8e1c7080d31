use chrono::NaiveDate;
use colored::Colorize;

use crate::model::{Completion, Habit, User};
use crate::stats::{render_progress_bar, HabitSummary, StreakStats};

/// Format a list of users
pub fn format_users_pretty(users: &[User]) -> String {
    if users.is_empty() {
        return "Users (0)\n  No users registered".to_string();
    }

    let mut output = format!("Users ({})\n", users.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for user in users {
        let marker = if user.is_active { "●".green() } else { "○".dimmed() };
        output.push_str(&format!(
            "{} {:>4}  {}  {}\n",
            marker,
            user.id.to_string().dimmed(),
            user.username.bold(),
            user.email.dimmed()
        ));
    }

    output
}

/// Format a single user
pub fn format_user_pretty(user: &User) -> String {
    let mut output = format!("{}\n", user.username.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), user.id));
    output.push_str(&format!("  {}: {}\n", "Email".dimmed(), user.email));
    output.push_str(&format!(
        "  {}: {}\n",
        "Active".dimmed(),
        if user.is_active { "yes" } else { "no" }
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Registered".dimmed(),
        user.created_at.format("%Y-%m-%d")
    ));
    output
}

/// Format a list of habits
pub fn format_habits_pretty(habits: &[Habit]) -> String {
    if habits.is_empty() {
        return "Habits (0)\n  No habits yet. Add one with `habits habit add <title>`".to_string();
    }

    let mut output = format!("Habits ({})\n", habits.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    for habit in habits {
        let mut line = format!("{:>4}  {}", habit.id.to_string().dimmed(), habit.title.bold());
        if let Some(description) = &habit.description {
            line.push_str(&format!("  {}", description.dimmed()));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single habit
pub fn format_habit_pretty(habit: &Habit) -> String {
    let mut output = format!("{}\n", habit.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), habit.id));
    if let Some(description) = &habit.description {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), description));
    }
    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        habit.created_at.format("%Y-%m-%d")
    ));
    output
}

/// Format a completion history, newest first
pub fn format_history_pretty(habit: &Habit, completions: &[Completion]) -> String {
    if completions.is_empty() {
        return format!("{} (0 completions)\n  Never completed", habit.title.bold());
    }

    let mut output = format!("{} ({} completions)\n", habit.title.bold(), completions.len());
    output.push_str(&"─".repeat(30));
    output.push('\n');

    for completion in completions {
        output.push_str(&format!(
            "  {} {}\n",
            "✓".green(),
            completion.date.format("%a %Y-%m-%d")
        ));
    }

    output
}

fn streak_text(days: u32) -> String {
    let text = format!("{days} {}", if days == 1 { "day" } else { "days" });
    if days > 0 {
        text.green().to_string()
    } else {
        text.dimmed().to_string()
    }
}

/// Format one habit's statistics with a 30-day strip
pub fn format_stats_pretty(habit: &Habit, stats: &StreakStats, as_of: NaiveDate, strip: &str) -> String {
    let mut output = Vec::new();

    output.push(format!("🔥 {}", habit.title.bold()));
    output.push("─".repeat(50));
    output.push(format!("  Current streak:  {}", streak_text(stats.current_streak)));
    output.push(format!("  Longest streak:  {}", streak_text(stats.longest_streak)));
    output.push(format!("  Total completed: {}", stats.total_completions));
    output.push(format!(
        "  Last 30 days:    {}",
        render_progress_bar(stats.completion_rate_30_day, 20)
    ));
    output.push(format!("                   {strip}"));
    output.push(format!("  {}", format!("as of {}", as_of.format("%Y-%m-%d")).dimmed()));

    output.join("\n")
}

/// Format the dashboard of all habits
pub fn format_summaries_pretty(rows: &[HabitSummary], as_of: NaiveDate) -> String {
    if rows.is_empty() {
        return "No habits yet. Add one with `habits habit add <title>`".to_string();
    }

    let title_width = rows
        .iter()
        .map(|r| r.habit.title.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 30);

    let mut output = Vec::new();
    output.push(format!(
        "📊 {} {}",
        "HABITS".bold(),
        format!("as of {}", as_of.format("%Y-%m-%d")).dimmed()
    ));
    output.push("─".repeat(title_width + 44));
    output.push(format!(
        "     {:<4}  {:<width$}  {:>7}  {:>7}  {:>5}  {:>4}",
        "ID",
        "Habit",
        "Current",
        "Longest",
        "Total",
        "30d",
        width = title_width
    ));

    for row in rows {
        let check = if row.completed_today {
            "[x]".green()
        } else {
            "[ ]".white()
        };
        let title: String = row.habit.title.chars().take(title_width).collect();
        let current = format!("{:>7}", row.stats.current_streak);
        let current = if row.stats.current_streak > 0 {
            current.green().to_string()
        } else {
            current
        };

        output.push(format!(
            "{} {:<4}  {:<width$}  {}  {:>7}  {:>5}  {:>3}%",
            check,
            row.habit.id,
            title,
            current,
            row.stats.longest_streak,
            row.stats.total_completions,
            row.stats.completion_rate_30_day,
            width = title_width
        ));
    }

    let done_today = rows.iter().filter(|r| r.completed_today).count();
    output.push(String::new());
    output.push(format!("Done today: {}/{}", done_today, rows.len()));

    output.join("\n")
}
