//! Path resolution for habits configuration and data files.
//!
//! All habits data is stored in `~/.habits/` (or `$HABITS_HOME`):
//! - `config.yaml` - Main configuration file
//! - `habits.db` - `SQLite` database with users, habits and completions

use std::path::PathBuf;

use crate::error::HabitsError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "HABITS_HOME";

/// Paths to habits configuration and data.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.habits/`
    pub root: PathBuf,
    /// Config file: `~/.habits/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.habits/habits.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `$HABITS_HOME`, falling back to `$HOME/.habits`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, HabitsError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            HabitsError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".habits")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("habits.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), HabitsError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                HabitsError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-habits");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("habits.db"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("data"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
