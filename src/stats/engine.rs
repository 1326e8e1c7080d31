//! Streak and completion-rate calculations.
//!
//! Everything in here is a pure function of a [`CompletionSet`] and, where the
//! answer depends on "now", an explicit reference date. Nothing reads the
//! clock, so results are reproducible for any `today`.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of the rolling completion-rate window, in days (today included).
pub const RATE_WINDOW_DAYS: u32 = 30;

/// The distinct days on which a single habit was completed.
///
/// Backed by an ordered set: insertion order never matters and a date
/// inserted twice is only counted once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    dates: BTreeSet<NaiveDate>,
}

impl CompletionSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dates: BTreeSet::new(),
        }
    }

    /// Add a date. Returns `false` if it was already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    /// Whether the habit was completed on `date`.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of distinct completion days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Most recent completion, regardless of any reference date.
    #[must_use]
    pub fn last_completion(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Dates in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a NaiveDate> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = &'a NaiveDate>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl Extend<NaiveDate> for CompletionSet {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.dates.extend(iter);
    }
}

/// Derived statistics for one habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Consecutive completed days ending at the reference date.
    pub current_streak: u32,
    /// Longest run of consecutive completed days ever.
    pub longest_streak: u32,
    /// Distinct completion days.
    pub total_completions: u32,
    /// Percentage (0-100) of the last 30 days that were completed.
    #[serde(rename = "completion_rate_last_30_days")]
    pub completion_rate_30_day: u8,
}

impl StreakStats {
    /// Compute all statistics for `dates` as seen from `today`.
    #[must_use]
    pub fn compute(dates: &CompletionSet, today: NaiveDate) -> Self {
        Self {
            current_streak: current_streak(dates, today),
            longest_streak: longest_streak(dates),
            total_completions: total_completions(dates),
            completion_rate_30_day: completion_rate_30_day(dates, today),
        }
    }
}

/// Consecutive completed days counting backward from `today` (inclusive).
///
/// Walks the completions newest-first, pairing the `i`-th one with
/// `today - i`; the first mismatch ends the streak. Completions dated after
/// `today` are not part of the walk. Returns 0 when `today` itself is not
/// completed.
#[must_use]
pub fn current_streak(dates: &CompletionSet, today: NaiveDate) -> u32 {
    let mut streak = 0u32;

    for (offset, date) in dates.dates.range(..=today).rev().enumerate() {
        let expected = u64::try_from(offset)
            .ok()
            .and_then(|days| today.checked_sub_days(Days::new(days)));

        if expected != Some(*date) {
            break;
        }
        streak = streak.saturating_add(1);
    }

    streak
}

/// Length of the longest run of calendar-consecutive dates.
#[must_use]
pub fn longest_streak(dates: &CompletionSet) -> u32 {
    let mut longest = 0u32;
    let mut current = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in dates.iter() {
        current = match prev {
            Some(p) if p.succ_opt() == Some(date) => current.saturating_add(1),
            _ => 1,
        };
        longest = longest.max(current);
        prev = Some(date);
    }

    longest
}

/// Number of distinct completion days.
#[must_use]
pub fn total_completions(dates: &CompletionSet) -> u32 {
    u32::try_from(dates.len()).unwrap_or(u32::MAX)
}

/// Percentage of the 30-day window ending at `today` that was completed.
///
/// The window is `today - 29 ..= today`. Rounds half up; with a denominator
/// of 30 an exact half never actually occurs.
#[must_use]
pub fn completion_rate_30_day(dates: &CompletionSet, today: NaiveDate) -> u8 {
    let start = window_start(today, RATE_WINDOW_DAYS);
    let completed = dates.dates.range(start..=today).count();
    let completed = u32::try_from(completed).unwrap_or(RATE_WINDOW_DAYS);

    let rate = (completed * 100 + RATE_WINDOW_DAYS / 2) / RATE_WINDOW_DAYS;
    u8::try_from(rate.min(100)).unwrap_or(100)
}

/// First day of a `days`-long window that ends on `today`.
///
/// Clamps to the earliest representable date instead of overflowing.
#[must_use]
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN)
}
