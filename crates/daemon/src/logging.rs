// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup for `lwd`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleError;

/// Log file name prefix inside `LW_LOG_DIR`; the appender adds a date suffix.
pub const LOG_FILE_PREFIX: &str = "lwd.log";

/// Install the global subscriber. Filter comes from `RUST_LOG` (default `info`).
///
/// With a `log_dir`, output goes to a daily-rotated file and the returned
/// guard must be held until exit so buffered lines are flushed.
pub fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>, LifecycleError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| LifecycleError::Logging(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| LifecycleError::Logging(e.to_string()))?;
            Ok(None)
        }
    }
}
