use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::store::{DEFAULT_JOURNAL_FILE, DEFAULT_TASKS_FILE, StorePaths};

pub const DATA_DIR_ENV: &str = "MOODOO_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "MOODOO_LOG";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{path}': {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Runtime settings.
///
/// The data directory comes from `--data-dir`, then `MOODOO_DATA_DIR`, then the
/// platform data directory. An optional `config.json` inside it overrides the
/// remaining fields, and `MOODOO_LOG` overrides the log level last.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub tasks_file: String,
    pub journal_file: String,
    pub log_level: String,
    /// How many recent mood entries the trend and pattern summaries look at
    pub trend_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tasks_file: String::from(DEFAULT_TASKS_FILE),
            journal_file: String::from(DEFAULT_JOURNAL_FILE),
            log_level: String::from("info"),
            trend_window: 7,
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moodoo")
}

impl Config {
    pub fn load(data_dir_flag: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::resolve(data_dir_flag, |key| env::var(key).ok())
    }

    /// Same as [`Config::load`] with the environment supplied by `lookup`.
    pub fn resolve(
        data_dir_flag: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = data_dir_flag
            .or_else(|| lookup(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        let path = data_dir.join(CONFIG_FILE);
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str::<Config>(&content)
                .map_err(|e| ConfigError::ParseFailed {
                    path: path.clone(),
                    source: e,
                })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(ConfigError::ReadFailed { path, source: e }),
        };

        config.data_dir = data_dir;
        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        Ok(config)
    }

    pub fn store_paths(&self) -> StorePaths {
        StorePaths::new(&self.data_dir, &self.tasks_file, &self.journal_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::resolve(Some(dir.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.tasks_file, "tasks.txt");
        assert_eq!(config.journal_file, "journal.txt");
        assert_eq!(config.trend_window, 7);
        assert_eq!(config.store_paths().tasks_file, dir.path().join("tasks.txt"));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "journal_file": "moods.txt", "trend_window": 14 }"#,
        )
        .unwrap();

        let config = Config::resolve(Some(dir.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.journal_file, "moods.txt");
        assert_eq!(config.trend_window, 14);
        assert_eq!(config.tasks_file, "tasks.txt");
        assert_eq!(config.store_paths().journal_file, dir.path().join("moods.txt"));
    }

    #[test]
    fn test_environment_supplies_data_dir_and_level() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().display().to_string();

        let config = Config::resolve(None, |key| match key {
            DATA_DIR_ENV => Some(data_dir.clone()),
            LOG_LEVEL_ENV => Some(String::from("debug")),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_flag_beats_environment() {
        let flag_dir = TempDir::new().unwrap();
        let config = Config::resolve(Some(flag_dir.path().to_path_buf()), |key| {
            (key == DATA_DIR_ENV).then(|| String::from("/somewhere/else"))
        })
        .unwrap();

        assert_eq!(config.data_dir, flag_dir.path());
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let result = Config::resolve(Some(dir.path().to_path_buf()), no_env);
        assert!(matches!(result, Err(ConfigError::ParseFailed { .. })));
    }
}
