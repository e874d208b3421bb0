//! Structured logging setup shared by both binaries.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_ENV: &str = "STOCKSENT_LOG_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    pub target: LogTarget,
}

impl LoggingConfig {
    /// Level from `RUST_LOG` (falling back to `default_level`), target from
    /// `STOCKSENT_LOG_FILE` when set.
    pub fn from_env(default_level: &str) -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string()),
            target: match std::env::var(LOG_FILE_ENV) {
                Ok(path) if !path.trim().is_empty() => LogTarget::File(PathBuf::from(path)),
                _ => LogTarget::Stderr,
            },
        }
    }

    /// Force a file target; used where stderr belongs to the terminal UI.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = LogTarget::File(path.into());
        self
    }

    /// `<data_local_dir>/stocksent/stocksent.log`
    pub fn default_log_file() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join("stocksent").join("stocksent.log"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter '{filter}': {message}")]
    Filter { filter: String, message: String },

    #[error("open log file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("a global subscriber is already installed")]
    AlreadyInitialized,
}

/// Install the global subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| LoggingError::Filter {
        filter: config.log_level.clone(),
        message: e.to_string(),
    })?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match &config.target {
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };
    result.map_err(|_| LoggingError::AlreadyInitialized)
}

/// Like [`init_logging`], but a subscriber that is already installed counts
/// as success. Filter and file errors still come back to the caller.
pub fn install_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    match init_logging(config) {
        Err(LoggingError::AlreadyInitialized) => Ok(()),
        other => other,
    }
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let io_err = |source| LoggingError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)
}
