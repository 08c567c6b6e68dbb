//! File logging for the command-line shell.
//!
//! Library code only talks to the `log` facade. The binary starts the
//! `flexi_logger` backend once, pointed at `<data_dir>/logs`.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "moodoo";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Unsupported log level '{0}'. Expected trace|debug|info|warn|error")]
    UnsupportedLevel(String),

    #[error("Failed to create log directory '{dir}': {source}")]
    CreateDirFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start logger in '{dir}': {source}")]
    StartFailed {
        dir: PathBuf,
        #[source]
        source: flexi_logger::FlexiLoggerError,
    },
}

pub fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(LoggingError::UnsupportedLevel(level.to_string())),
    }
}

/// Starts rotating file logs in `log_dir`.
///
/// Logging stops when the returned handle is dropped, so the caller keeps it for
/// the whole run.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle, LoggingError> {
    let level = normalize_level(level)?;
    std::fs::create_dir_all(log_dir).map_err(|e| LoggingError::CreateDirFailed {
        dir: log_dir.to_path_buf(),
        source: e,
    })?;

    let start_failed = |e| LoggingError::StartFailed {
        dir: log_dir.to_path_buf(),
        source: e,
    };
    let handle = Logger::try_with_str(level)
        .map_err(start_failed)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(start_failed)?;

    info!(
        "event=app_start status=ok version={} level={}",
        env!("CARGO_PKG_VERSION"),
        level
    );
    Ok(handle)
}
