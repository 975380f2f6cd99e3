// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `lw`: command-line client for the line protocol daemon

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod commands;
mod exit_error;

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lw_wire::Message;

use crate::client::Client;
use crate::exit_error::{ExitError, EXIT_TRANSPORT_ERROR};

#[derive(Parser, Debug)]
#[command(name = "lw", version, about = "Send line protocol messages to lwd")]
struct Cli {
    /// Daemon address (host:port)
    #[arg(long, global = true, default_value = "127.0.0.1:9090")]
    addr: String,

    /// Connect/read/write timeout in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum CliCommand {
    /// Send one message and print the reply
    Send {
        /// Command line of the message (e.g. SET)
        command: String,
        /// Data line of the message
        #[arg(default_value = "")]
        data: String,
    },
    /// Check that the daemon is answering
    Ping {
        /// Payload echoed back in the PONG
        #[arg(default_value = "")]
        data: String,
    },
    /// Read messages from stdin (two lines each) and print every reply
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("error: {}", exit);
                ExitCode::from(exit.code)
            }
            None => {
                eprintln!("error: {:#}", e);
                ExitCode::from(EXIT_TRANSPORT_ERROR)
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut client = Client::connect(&cli.addr, Duration::from_millis(cli.timeout_ms))?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        CliCommand::Send { command, data } => {
            commands::send(&mut client, Message::new(command, data), &mut stdout)
        }
        CliCommand::Ping { data } => {
            commands::send(&mut client, Message::new("PING", data), &mut stdout)
        }
        CliCommand::Repl => {
            let mut stdin = std::io::stdin().lock();
            commands::repl(&mut client, &mut stdin, &mut stdout).map(|_| ())
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
