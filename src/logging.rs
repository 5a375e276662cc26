//! File logging for the binaries
//!
//! The library only emits `tracing` events; a notebook kernel that wants
//! them installs its own subscriber. The CLI and the notifier log to a
//! daily-rotated file so nothing lands on the notebook's output.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get the log directory path
pub fn log_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || std::env::temp_dir().join("notebook-alert").join("logs"),
        |dirs| dirs.cache_dir().join("notebook-alert").join("logs"),
    )
}

/// Install the global subscriber writing to `<log_dir>/<file_name>`
///
/// Keep the returned guard alive for the life of the process so buffered
/// lines are flushed on exit.
pub fn init(log_level: &str, file_name: &str) -> std::io::Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::daily(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let log_filter = format!("notebook_alert={log_level}");
    // A second init in the same process is ignored
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init();

    tracing::debug!("Log directory: {:?}", dir);
    Ok(guard)
}
