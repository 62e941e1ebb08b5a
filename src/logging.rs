//! Tracing subscriber setup
//!
//! All output goes to stderr (stdout is reserved for the JSON response).
//! Outside debug mode a full debug log is also appended to a file.

use std::path::Path;

use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LogConfig;

const FILE_FILTER: &str = "info,http_resource=debug";

/// Installs the global subscriber. Does nothing if one is already set.
pub fn init(config: &LogConfig) {
    let default_level = if config.debug { "debug" } else { "info" };
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let (file_layer, file_error) = match config.log_file.as_deref().map(open_log_file) {
        Some(Ok(appender)) => (
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_filter(EnvFilter::new(FILE_FILTER)),
            ),
            None,
        ),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if let Some(e) = file_error {
        warn!("Failed to open log file, logging to stderr only: {}", e);
    }
}

fn open_log_file(path: &Path) -> Result<RollingFileAppender, String> {
    let dir = path
        .parent()
        .ok_or_else(|| format!("{:?} has no parent directory", path))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("{:?} has no file name", path))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .map_err(|e| e.to_string())
}
