// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command dispatch: maps a request's command line to its handler.
//!
//! Replies are envelopes too. Their command line names the outcome
//! (`PONG`, `OK`, `VALUE`, `NIL`, `ERR`, ...) and their data line carries
//! the payload.

use std::sync::atomic::Ordering;

use lw_wire::{encode, Message};
use serde::{Deserialize, Serialize};

use crate::env::DAEMON_VERSION;
use crate::store::Store;

use super::ListenCtx;

/// The closed set of commands the daemon understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Echo,
    Set,
    Get,
    Del,
    Keys,
    Info,
    Quit,
    Shutdown,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Ping,
        Command::Echo,
        Command::Set,
        Command::Get,
        Command::Del,
        Command::Keys,
        Command::Info,
        Command::Quit,
        Command::Shutdown,
    ];

    /// Wire name of the command.
    pub fn name(self) -> &'static str {
        match self {
            Command::Ping => "PING",
            Command::Echo => "ECHO",
            Command::Set => "SET",
            Command::Get => "GET",
            Command::Del => "DEL",
            Command::Keys => "KEYS",
            Command::Info => "INFO",
            Command::Quit => "QUIT",
            Command::Shutdown => "SHUTDOWN",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.name() == name)
    }
}

/// Payload of the `INFO` reply, JSON-encoded on the data line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub version: String,
    pub connections: usize,
    pub total_connections: u64,
    pub keys: usize,
    pub uptime_ms: u64,
}

/// What the connection does once the reply is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum After {
    Continue,
    Close,
    Shutdown,
}

pub(crate) fn error_reply(message: impl Into<String>) -> Message {
    Message::new("ERR", message)
}

/// Run one request against the daemon state.
pub(crate) fn dispatch(request: Message, ctx: &ListenCtx) -> (Message, After) {
    let (name, data) = request.into_parts();
    let Some(command) = Command::parse(&name) else {
        return (error_reply(format!("unknown command: {}", name)), After::Continue);
    };

    let reply = match command {
        Command::Ping => Message::new("PONG", data),
        Command::Echo => Message::new("ECHO", data),
        Command::Set => handle_set(&ctx.store, &data),
        Command::Get => match ctx.store.get(&data) {
            Some(value) => Message::new("VALUE", value),
            None => Message::new("NIL", ""),
        },
        Command::Del => {
            let removed = ctx.store.remove(&data);
            Message::new("DELETED", if removed { "1" } else { "0" })
        }
        Command::Keys => match encode(&ctx.store.keys(&data)) {
            Ok(json) => Message::new("KEYS", json),
            Err(e) => error_reply(e.to_string()),
        },
        Command::Info => handle_info(ctx),
        Command::Quit => return (Message::new("BYE", ""), After::Close),
        Command::Shutdown => return (Message::new("BYE", ""), After::Shutdown),
    };
    (reply, After::Continue)
}

/// `SET key=value`. The value may itself contain `=`.
fn handle_set(store: &Store, data: &str) -> Message {
    match data.split_once('=') {
        Some((key, value)) if !key.is_empty() => {
            store.set(key, value);
            Message::new("OK", "")
        }
        _ => error_reply("SET expects key=value"),
    }
}

fn handle_info(ctx: &ListenCtx) -> Message {
    let info = ServerInfo {
        version: DAEMON_VERSION.to_string(),
        connections: ctx.active.load(Ordering::Relaxed),
        total_connections: ctx.total.load(Ordering::Relaxed),
        keys: ctx.store.len(),
        uptime_ms: ctx.start_time.elapsed().as_millis() as u64,
    };
    match encode(&info) {
        Ok(json) => Message::new("INFO", json),
        Err(e) => error_reply(e.to_string()),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
