//! Configuration settings for habits.
//!
//! Settings are loaded from `~/.habits/config.yaml`. Missing files and
//! missing fields fall back to defaults.

use std::path::Path;

use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::error::HabitsError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Identity settings.
    pub user: UserConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Output format used when `--output` is not given.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default)]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Who "I" am when no `--user` is passed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserConfig {
    /// Username of the current user.
    pub current: Option<String>,
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Which calendar decides what "today" is.
    #[serde(default)]
    pub clock: ClockSetting,
    /// Weeks shown by `habits heatmap` when `--weeks` is not given.
    #[serde(default = "default_heatmap_weeks")]
    pub heatmap_weeks: usize,
}

/// Calendar used to resolve "today".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClockSetting {
    /// The machine's local time zone.
    #[default]
    Local,
    /// UTC.
    Utc,
}

impl ClockSetting {
    /// Today's date on this calendar.
    #[must_use]
    pub fn today(self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Utc => Utc::now().date_naive(),
        }
    }
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_heatmap_weeks() -> usize {
    12
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: ColorSetting::default(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            clock: ClockSetting::default(),
            heatmap_weeks: default_heatmap_weeks(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, HabitsError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            HabitsError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            HabitsError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), HabitsError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| HabitsError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            HabitsError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert!(config.user.current.is_none());
        assert_eq!(config.stats.clock, ClockSetting::Local);
        assert_eq!(config.stats.heatmap_weeks, 12);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from_path(&temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.user.current = Some("ada".to_string());
        config.stats.clock = ClockSetting::Utc;
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded.user.current.as_deref(), Some("ada"));
        assert_eq!(loaded.stats.clock, ClockSetting::Utc);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
stats:
  clock: utc
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.stats.clock, ClockSetting::Utc);
        assert_eq!(config.stats.heatmap_weeks, 12);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "stats: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(HabitsError::Config(_))
        ));
    }
}
