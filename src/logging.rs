//! Tracing setup for the command-line binary
//!
//! Everything at or above the `METARENAME_LOG` filter (default `info`) goes to the log
//! file. Warnings are echoed to stderr unless running quiet; errors reach the operator
//! through [`crate::report::ErrorReporter`] instead.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::{MetaRenameError, Result};

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "METARENAME_LOG";

/// Keeps the background log writer alive; dropping it flushes the file.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is already set.
pub fn init(log_file: &Path, quiet: bool) -> Result<LogGuard> {
    let file = open_log_file(log_file)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = (!quiet).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(filter_fn(|meta| *meta.level() == Level::WARN))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| MetaRenameError::Logging(e.to_string()))?;

    Ok(LogGuard { _guard: guard })
}

/// Open `path` for appending, creating parent directories as needed
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
