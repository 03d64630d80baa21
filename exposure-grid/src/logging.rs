//! Logging setup.
//!
//! Log output goes to two places:
//! - a file under the configured directory, cleared when the session starts
//! - stdout
//!
//! `RUST_LOG` overrides the configured level.

use std::fs;
use std::io;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Keeps the file writer alive; dropping it flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be cleared. Calling this twice in one process panics inside
/// `tracing_subscriber`, so binaries call it once at start-up.
pub fn init_logging(settings: &LoggingSettings) -> Result<LoggingGuard, io::Error> {
    prepare_log_file(settings)?;

    let file_appender = tracing_appender::rolling::never(&settings.directory, &settings.file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(&settings.level))
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// `RUST_LOG` when set and valid, otherwise `default_level`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Create the log directory and truncate the log file.
fn prepare_log_file(settings: &LoggingSettings) -> Result<(), io::Error> {
    fs::create_dir_all(&settings.directory)?;
    fs::write(settings.directory.join(&settings.file), "")
}
