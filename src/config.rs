//! Column configuration for the board.
//!
//! Columns are display configuration, not data: a task is linked to a
//! column only through its `status` field, and the column set is never
//! persisted with the tasks. This module handles the optional
//! `.taskboard/board-config.yaml` file which lets a deployment override
//! the default three-column layout.

use crate::error::Result;
use crate::tasks::Status;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file path relative to the base directory.
pub const CONFIG_FILE_PATH: &str = ".taskboard/board-config.yaml";

/// A display column on the board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    /// Status bucket this column displays.
    pub id: Status,
    /// Column heading.
    pub title: String,
    /// Accent color as a CSS hex string, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Column {
    /// Create a column with the given status, title, and accent color.
    pub fn new(id: Status, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self { id, title: title.into(), color: Some(color.into()) }
    }
}

/// Board configuration: the ordered column set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardConfig {
    /// Columns in display order.
    #[serde(default = "default_columns")]
    pub columns: Vec<Column>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { columns: default_columns() }
    }
}

/// The stock three-column layout.
fn default_columns() -> Vec<Column> {
    vec![
        Column::new(Status::Todo, "To Do", "#5045e6"),
        Column::new(Status::InProgress, "In Progress", "#f69e0a"),
        Column::new(Status::Done, "Done", "#22c45e"),
    ]
}

impl BoardConfig {
    /// Load config from a specific base directory, returning `None` if
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = base_dir.join(CONFIG_FILE_PATH);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a base directory, falling back to the default
    /// layout when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(base_dir: &Path) -> Result<Self> {
        Ok(Self::load_from(base_dir)?.unwrap_or_default())
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = base_dir.join(CONFIG_FILE_PATH);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    #[must_use]
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_columns() {
        let config = BoardConfig::default();
        let ids: Vec<Status> = config.columns.iter().map(|col| col.id).collect();
        assert_eq!(ids, vec![Status::Todo, Status::InProgress, Status::Done]);
        assert_eq!(config.columns[0].title, "To Do");
        assert_eq!(config.columns[0].color.as_deref(), Some("#5045e6"));
    }

    #[test]
    fn test_load_from_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let config = BoardConfig::load_from(dir.path()).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = TempDir::new().unwrap();
        let config = BoardConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, BoardConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();

        let config = BoardConfig {
            columns: vec![
                Column::new(Status::Done, "Finished", "#000000"),
                Column { id: Status::Todo, title: "Backlog".to_string(), color: None },
            ],
        };
        config.save_to(dir.path()).unwrap();

        let loaded = BoardConfig::load_from(dir.path()).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = BoardConfig::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "columns: [not a column").unwrap();

        assert!(BoardConfig::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_status_ids_serialize_kebab_case() {
        let dir = TempDir::new().unwrap();
        BoardConfig::default().save_to(dir.path()).unwrap();

        let content = std::fs::read_to_string(BoardConfig::config_path(dir.path())).unwrap();
        assert!(content.contains("in-progress"));
    }
}
