// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: configuration, startup, shutdown.

mod startup;
pub use startup::{shutdown_on_ctrl_c, startup};

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use lw_wire::DEFAULT_MAX_LINE_LENGTH;
use thiserror::Error;

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the TCP listener binds to
    pub bind_addr: SocketAddr,
    /// Idle time allowed between frames before a connection is dropped
    pub idle_timeout: Duration,
    /// How long shutdown waits for open connections to finish
    pub drain_timeout: Duration,
    /// Longest accepted line, in bytes
    pub max_line_length: usize,
    /// Directory for rotated log files (stderr when `None`)
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `LW_*` environment variables.
    pub fn load() -> Result<Self, LifecycleError> {
        Ok(Self {
            bind_addr: SocketAddr::new(env::bind_ip()?, env::tcp_port()),
            idle_timeout: env::idle_timeout(),
            drain_timeout: env::drain_timeout(),
            max_line_length: env::max_line_length(),
            log_dir: env::log_dir(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], env::DEFAULT_PORT)),
            idle_timeout: Duration::from_secs(30),
            drain_timeout: Duration::from_secs(5),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            log_dir: None,
        }
    }
}

/// Errors from daemon startup
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Failed to bind socket at {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
