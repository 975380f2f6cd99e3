// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lwd`: line protocol daemon

use std::process::ExitCode;

use lw_daemon::lifecycle::{self, Config, LifecycleError};
use lw_daemon::logging::init_logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("lwd: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), LifecycleError> {
    let config = Config::load()?;
    // Held until exit so the file appender flushes
    let _log_guard = init_logging(config.log_dir.as_deref())?;

    let listener = lifecycle::startup(&config).await?;
    lifecycle::shutdown_on_ctrl_c(listener.shutdown_token());
    listener.run().await;

    info!("lwd stopped");
    Ok(())
}
