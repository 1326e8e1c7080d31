//! Terminal visualization for habit statistics.

use chrono::{Datelike, Days, NaiveDate};

use super::engine::{window_start, CompletionSet};

/// Widest heatmap `render_heatmap` will draw, about ten years.
pub const MAX_HEATMAP_WEEKS: usize = 520;

const FULL_BLOCK: char = '█';
const DONE_CELL: char = '■';
const MISSED_CELL: char = '·';

/// Render a calendar heatmap of the last `weeks` weeks ending at `today`.
///
/// Rows are weekdays (Mon..Sun), columns are weeks oldest to newest. Days
/// after `today` in the final column are left blank. `weeks` is clamped to
/// `1..=MAX_HEATMAP_WEEKS`.
#[must_use]
pub fn render_heatmap(dates: &CompletionSet, today: NaiveDate, weeks: usize) -> String {
    let weeks = weeks.clamp(1, MAX_HEATMAP_WEEKS);
    // At most MAX_HEATMAP_WEEKS, so this never truncates
    let span = u64::try_from(weeks).unwrap_or(1);
    let day_labels = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    // Monday of the current week, then back `weeks - 1` more weeks
    let this_monday = today
        .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
        .unwrap_or(NaiveDate::MIN);
    let first_monday = this_monday
        .checked_sub_days(Days::new(span.saturating_sub(1).saturating_mul(7)))
        .unwrap_or(NaiveDate::MIN);

    let mut lines = Vec::with_capacity(10);

    let mut header = "    ".to_string();
    for week in 0..span {
        let monday = first_monday.checked_add_days(Days::new(week.saturating_mul(7)));
        match monday {
            Some(m) if m.day() <= 7 => header.push_str(&format!("{:<3}", m.format("%b"))),
            _ => header.push_str("   "),
        }
    }
    lines.push(header.trim_end().to_string());

    for (day_idx, label) in (0u64..).zip(day_labels) {
        let mut row = format!("{label} ");

        for week in 0..span {
            let offset = week.saturating_mul(7).saturating_add(day_idx);
            let date = first_monday.checked_add_days(Days::new(offset));

            let cell = match date {
                Some(d) if d > today => ' ',
                Some(d) if dates.contains(d) => DONE_CELL,
                Some(_) => MISSED_CELL,
                None => ' ',
            };
            row.push_str(&format!("{cell}  "));
        }

        lines.push(row.trim_end().to_string());
    }

    lines.push(String::new());
    lines.push(format!("Legend: {DONE_CELL} = done  {MISSED_CELL} = missed"));

    lines.join("\n")
}

/// One character per day of the `days`-long window ending at `today`,
/// oldest first.
#[must_use]
pub fn render_window_strip(dates: &CompletionSet, today: NaiveDate, days: u32) -> String {
    let start = window_start(today, days);

    start
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|d| if dates.contains(d) { FULL_BLOCK } else { MISSED_CELL })
        .collect()
}

/// Render a progress bar for a percentage.
#[must_use]
pub fn render_progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = usize::from(percent) * width / 100;
    let empty = width - filled;

    format!(
        "[{}{}] {percent}%",
        FULL_BLOCK.to_string().repeat(filled),
        "░".repeat(empty)
    )
}
