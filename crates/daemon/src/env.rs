// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use lw_wire::DEFAULT_MAX_LINE_LENGTH;

use crate::lifecycle::LifecycleError;

/// Daemon version reported by `INFO`
pub const DAEMON_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default TCP port
pub const DEFAULT_PORT: u16 = 9090;

/// Interface to bind (default loopback). Unlike the numeric settings, an
/// unparsable value is an error.
pub fn bind_ip() -> Result<IpAddr, LifecycleError> {
    match std::env::var("LW_BIND_ADDR") {
        Ok(value) => value
            .parse::<IpAddr>()
            .map_err(|_| LifecycleError::InvalidEnv { name: "LW_BIND_ADDR", value }),
        Err(_) => Ok(IpAddr::from([127, 0, 0, 1])),
    }
}

/// TCP port to listen on (default 9090)
pub fn tcp_port() -> u16 {
    std::env::var("LW_TCP_PORT").ok().and_then(|s| s.parse::<u16>().ok()).unwrap_or(DEFAULT_PORT)
}

/// How long a connection may sit idle between frames (default 30s)
pub fn idle_timeout() -> Duration {
    std::env::var("LW_IDLE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(30))
}

/// Shutdown drain timeout (default 5s, configurable via `LW_DRAIN_TIMEOUT_MS`).
pub fn drain_timeout() -> Duration {
    std::env::var("LW_DRAIN_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

/// Longest accepted line in bytes
pub fn max_line_length() -> usize {
    std::env::var("LW_MAX_LINE_LENGTH")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_LINE_LENGTH)
}

/// Directory for rotated log files. Logs go to stderr when unset.
pub fn log_dir() -> Option<PathBuf> {
    std::env::var("LW_LOG_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
