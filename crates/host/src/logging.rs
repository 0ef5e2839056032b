// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup for the host process

use crate::config::Config;
use std::io;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Startup marker prefix written to the log before tracing starts.
/// Full format: "--- tavernd: starting (pid: 12345) ---"
pub const STARTUP_MARKER_PREFIX: &str = "--- tavernd: starting (pid: ";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        #[source]
        source: ParseError,
    },
    #[error("log file {0} has no parent directory")]
    NoLogDir(std::path::PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Build the filter: `RUST_LOG` when set, else the configured filter
pub fn build_filter(env: Option<&str>, configured: &str) -> Result<EnvFilter, LoggingError> {
    let directives = env.filter(|s| !s.trim().is_empty()).unwrap_or(configured);
    EnvFilter::try_new(directives).map_err(|source| LoggingError::Filter {
        filter: directives.to_string(),
        source,
    })
}

/// Append the startup marker to the log file
pub fn write_startup_marker(config: &Config) -> Result<(), LoggingError> {
    use std::io::Write;

    std::fs::create_dir_all(&config.state_dir)?;
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;
    writeln!(file, "{}{}) ---", STARTUP_MARKER_PREFIX, std::process::id())?;
    Ok(())
}

/// Install the global subscriber writing to `tavernd.log`.
///
/// The returned guard flushes buffered lines on drop; hold it for the
/// lifetime of the process.
pub fn init(config: &Config) -> Result<WorkerGuard, LoggingError> {
    use tracing_subscriber::{fmt, prelude::*};

    let log_path = config.log_path();
    let dir = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoLogDir(log_path.clone()))?;
    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::NoLogDir(log_path.clone()))?;
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env = std::env::var("RUST_LOG").ok();
    let filter = build_filter(env.as_deref(), &config.log_filter)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
