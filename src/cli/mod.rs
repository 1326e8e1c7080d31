//! Command-line surface: argument parsing and command handlers.

pub mod args;
pub mod commands;
