//! Core abstractions for habits.
//!
//! Date expression parsing and the traits that connect the statistics engine
//! to storage.

mod datetime;
mod traits;

pub use datetime::{parse_date_expr, resolve_date};
#[cfg(test)]
pub use traits::MockCompletionSource;
pub use traits::CompletionSource;
