//! Configuration management for habits.
//!
//! This module handles loading and saving configuration from `~/.habits/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ClockSetting, ColorSetting, Config, GeneralConfig, StatsConfig, UserConfig};
