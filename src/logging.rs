//! Logging setup for the dashboard.
//!
//! Installs a global tracing subscriber that mirrors events to stderr, keeping
//! rendered reports on stdout clean, and to a per-launch log file under
//! `.sentiboard/logs`. Only the newest launch logs are kept.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
    time::SystemTime,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Launch logs kept on disk, including the current one.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "sentiboard";
const LOG_EXTENSION: &str = "log";
const DEFAULT_FILTER: &str = "info";

const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Keeps the non-blocking writer alive and remembers where it writes.
struct ActiveLog {
    _guard: WorkerGuard,
    path: PathBuf,
}

static ACTIVE_LOG: OnceLock<ActiveLog> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The `.sentiboard/logs` directory could not be resolved or created.
    #[error("Log directory unavailable: {0}")]
    LogDir(#[from] AppDirError),
    /// A filesystem operation on the log directory failed.
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    /// The launch timestamp could not be formatted into a file name.
    #[error("Failed to format log file timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
    /// Another global subscriber is already installed.
    #[error("Failed to install global tracing subscriber: {0}")]
    Install(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl LoggingError {
    fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> Self + 'a {
        move |source| LoggingError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where log events are mirrored besides the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleLogging {
    /// Mirror events to stderr.
    #[default]
    Stderr,
    /// File only; used when the process output is machine-readable.
    Off,
}

/// The file a single run logs to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LaunchLog {
    dir: PathBuf,
    file_name: String,
}

impl LaunchLog {
    fn at(dir: PathBuf, started: OffsetDateTime) -> Result<Self, LoggingError> {
        let stamp = started.format(FILE_STAMP)?;
        Ok(Self {
            dir,
            file_name: format!("{LOG_FILE_PREFIX}_{stamp}.{LOG_EXTENSION}"),
        })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Create the file up front so pruning counts it as the newest log.
    fn touch(&self) -> Result<PathBuf, LoggingError> {
        let path = self.path();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(LoggingError::io("create log file", &path))?;
        Ok(path)
    }
}

/// Install the global subscriber and return the path of this run's log file.
///
/// Later calls return the same path without reinstalling anything. Callers
/// are expected to report the error and carry on without logging.
pub fn init(console: ConsoleLogging) -> Result<PathBuf, LoggingError> {
    if let Some(active) = ACTIVE_LOG.get() {
        return Ok(active.path.clone());
    }

    let launch = LaunchLog::at(app_dirs::logs_dir()?, started_at())?;
    let log_path = launch.touch()?;
    prune_old_logs(&launch.dir, MAX_LOG_FILES)?;

    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::never(&launch.dir, &launch.file_name));
    let timer = fmt::time::OffsetTime::new(local_offset(), LINE_STAMP);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_timer(timer.clone())
        .with_writer(file_writer);
    let console_layer = match console {
        ConsoleLogging::Stderr => Some(
            fmt::layer()
                .with_timer(timer)
                .with_target(false)
                .with_writer(std::io::stderr),
        ),
        ConsoleLogging::Off => None,
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing::subscriber::set_global_default(
        Registry::default()
            .with(filter)
            .with(file_layer)
            .with(console_layer),
    )?;
    let _ = ACTIVE_LOG.set(ActiveLog {
        _guard: guard,
        path: log_path.clone(),
    });

    tracing::info!(?console, "Writing log to {}", log_path.display());
    Ok(log_path)
}

/// `.log` files in `dir`, oldest first.
fn log_files_oldest_first(dir: &Path) -> Result<Vec<PathBuf>, LoggingError> {
    let mut logs: Vec<(SystemTime, PathBuf)> = fs::read_dir(dir)
        .map_err(LoggingError::io("read log directory", dir))?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == LOG_EXTENSION))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();
    logs.sort();
    Ok(logs.into_iter().map(|(_, path)| path).collect())
}

fn prune_old_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let logs = log_files_oldest_first(dir)?;
    let excess = logs.len().saturating_sub(keep);
    for path in &logs[..excess] {
        fs::remove_file(path).map_err(LoggingError::io("remove old log file", path))?;
    }
    Ok(())
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn started_at() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}
