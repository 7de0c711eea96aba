use std::path::PathBuf;

use crate::logging;

pub const DEFAULT_DATA_PATH: &str = "data/addressbook.db";
pub const DEFAULT_COLORS_PATH: &str = "data/groupColors.txt";
pub const DEFAULT_LOG_DIR: &str = "data/logs";

/// Where the application keeps its files and how loudly it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
    pub colors_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            colors_path: PathBuf::from(DEFAULT_COLORS_PATH),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: logging::default_log_level().to_string(),
        }
    }
}

impl Config {
    /// Places the color file and logs next to `data_path` unless they were
    /// set explicitly.
    pub fn with_data_path(data_path: PathBuf) -> Self {
        let dir = data_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default();
        Self {
            colors_path: dir.join("groupColors.txt"),
            log_dir: dir.join("logs"),
            data_path,
            ..Self::default()
        }
    }
}
