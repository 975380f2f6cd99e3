// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and signal handling.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::listener::Listener;

use super::{Config, LifecycleError};

/// Bind the listener described by `config`.
pub async fn startup(config: &Config) -> Result<Listener, LifecycleError> {
    let listener = Listener::bind(config).await?;
    info!(
        addr = %listener.local_addr()?,
        idle_timeout_ms = config.idle_timeout.as_millis() as u64,
        max_line_length = config.max_line_length,
        "lwd listening"
    );
    Ok(listener)
}

/// Cancel `shutdown` on Ctrl-C.
pub fn shutdown_on_ctrl_c(shutdown: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => info!("received Ctrl-C, shutting down"),
                    Err(e) => warn!("failed to listen for Ctrl-C: {}", e),
                }
                shutdown.cancel();
            }
            _ = shutdown.cancelled() => {}
        }
    });
}
