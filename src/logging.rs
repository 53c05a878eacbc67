//! File-backed tracing setup. The terminal belongs to the UI, so log output
//! never goes to stdout or stderr.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

pub const LOG_FILE_NAME: &str = "ewm-quiz.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

pub fn log_dir(config: &LogConfig) -> PathBuf {
    config
        .dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("ewm-quiz"))
}

/// `-v` and `-vv` override the configured level; `RUST_LOG` wins over both.
pub fn filter_directive(config: &LogConfig, verbose: u8) -> String {
    match verbose {
        0 => config.level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines are flushed.
pub fn init(config: &LogConfig, verbose: u8) -> Result<WorkerGuard, LoggingError> {
    let dir = log_dir(config);
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::Directory {
        path: dir.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| LoggingError::Subscriber(err.to_string()))?;

    Ok(guard)
}
