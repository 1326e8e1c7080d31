//! Seams between the statistics engine and its collaborators.

use chrono::NaiveDate;

use crate::error::HabitsError;

/// Something that can list the days a habit was completed.
///
/// The storage layer implements this; the stats service only depends on the
/// trait, so it can be exercised without a database.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionSource {
    /// All completion dates recorded for `habit_id`, in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn completion_dates(&self, habit_id: i64) -> Result<Vec<NaiveDate>, HabitsError>;
}
