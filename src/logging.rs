//! Log sink selection and subscriber setup.
//!
//! The TUI owns the terminal while it runs, so an interactive session logs to
//! a file. Piped or redirected runs log to stdout.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the sink: `auto`, `file` or `stdout`.
pub const LOG_MODE_ENV: &str = "OBESITY_LOG_MODE";

/// Overrides the log file location.
pub const LOG_FILE_ENV: &str = "OBESITY_LOG_FILE";

const DEFAULT_LOG_FILE: &str = "obesity-risk.log";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(PathBuf),
    Stdout,
}

impl LogSink {
    /// Pick a sink from the mode setting and whether stdout is a terminal.
    ///
    /// Unrecognized modes behave like `auto`.
    #[must_use]
    pub fn resolve(mode: Option<&str>, file: Option<&str>, interactive: bool) -> Self {
        let to_file = match mode {
            Some("file") => true,
            Some("stdout") => false,
            _ => interactive,
        };

        if to_file {
            Self::File(PathBuf::from(file.unwrap_or(DEFAULT_LOG_FILE)))
        } else {
            Self::Stdout
        }
    }

    fn from_env() -> Self {
        let mode = std::env::var(LOG_MODE_ENV).ok();
        let file = std::env::var(LOG_FILE_ENV).ok();
        Self::resolve(mode.as_deref(), file.as_deref(), std::io::stdout().is_terminal())
    }
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
///
/// # Errors
/// Returns error if the log file cannot be opened.
pub fn init_logging() -> Result<WorkerGuard> {
    let sink = LogSink::from_env();

    let mut dir_error = None;
    let (writer, guard) = match &sink {
        LogSink::File(path) => {
            if let Err(e) = ensure_parent_dir(path) {
                dir_error = Some(e);
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogSink::Stdout => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    if let Some(e) = dir_error {
        tracing::warn!("Could not create log directory: {}", e);
    }
    tracing::debug!("Logging to {:?}", sink);

    Ok(guard)
}

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
