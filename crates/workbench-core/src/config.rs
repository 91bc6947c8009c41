//! Workbench configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use workbench_history::HistoryOptions;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Parent folder of all untitled workspaces
    pub untitled_workspaces_home: PathBuf,
    /// Parent folder of per-workspace backups
    pub backups_home: PathBuf,
    /// Maximum number of remembered workspaces and folders
    pub max_recent_workspaces: usize,
    /// Maximum number of remembered files
    pub max_recent_files: usize,
    /// Buffered history change events per subscriber
    pub change_channel_capacity: usize,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("workbench.db"),
            untitled_workspaces_home: data_dir.join("Workspaces"),
            backups_home: data_dir.join("Backups"),
            max_recent_workspaces: 50,
            max_recent_files: 50,
            change_channel_capacity: 64,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Workbench"))
            .unwrap_or_else(|| PathBuf::from(".workbench"))
    }

    pub fn history_options(&self) -> HistoryOptions {
        HistoryOptions {
            max_workspaces: self.max_recent_workspaces,
            max_files: self.max_recent_files,
            channel_capacity: self.change_channel_capacity,
        }
    }

    pub fn validate(&self) -> Result<()> {
        // Untitled workspaces are addressed by file URL, which needs an absolute path
        if !self.untitled_workspaces_home.is_absolute() {
            return Err(CoreError::Config(format!(
                "untitled workspaces home must be absolute: {}",
                self.untitled_workspaces_home.display()
            )));
        }

        if self.change_channel_capacity == 0 {
            return Err(CoreError::Config(
                "change channel capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_under_data_dir() {
        let config = Config::new(PathBuf::from("/data"));

        assert_eq!(config.database_path, PathBuf::from("/data/workbench.db"));
        assert_eq!(config.untitled_workspaces_home, PathBuf::from("/data/Workspaces"));
        assert_eq!(config.backups_home, PathBuf::from("/data/Backups"));
        assert!(config.validate().is_ok());

        let options = config.history_options();
        assert_eq!(options.max_workspaces, 50);
        assert_eq!(options.max_files, 50);
    }

    #[test]
    fn test_relative_untitled_home_is_rejected() {
        let mut config = Config::new(PathBuf::from("/data"));
        config.untitled_workspaces_home = PathBuf::from("relative/Workspaces");

        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
