//! habits - a habit tracker for the terminal
//!
//! Users register, create habits and mark them done per calendar day. Streaks
//! and completion rates are recomputed from the stored completion history on
//! every request.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod model;
pub mod output;
pub mod stats;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HabitsError;
