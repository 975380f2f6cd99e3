// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use lw_wire::{read_message, Message};

use crate::client::{Client, ClientError};
use crate::exit_error::{ExitError, EXIT_REMOTE_ERROR};

/// Anything that can answer a request envelope with a reply envelope.
pub trait Exchange {
    fn request(&mut self, request: &Message) -> Result<Message, ClientError>;
}

impl Exchange for Client {
    fn request(&mut self, request: &Message) -> Result<Message, ClientError> {
        Client::request(self, request)
    }
}

/// `lw send` / `lw ping`: one request, reply printed to `out`.
///
/// An `ERR` reply becomes an [`ExitError`] with code 1.
pub fn send<E: Exchange, W: Write>(client: &mut E, request: Message, out: &mut W) -> Result<()> {
    request.validate().context("request cannot be framed")?;
    let reply = client.request(&request)?;
    if reply.command() == "ERR" {
        return Err(ExitError::new(EXIT_REMOTE_ERROR, reply.data()).into());
    }
    writeln!(out, "{}", reply)?;
    Ok(())
}

/// `lw repl`: stream envelopes from `input` (two lines each) until end of
/// input or until the daemon says `BYE`, printing every reply.
///
/// Returns the number of requests sent.
pub fn repl<E: Exchange, R: BufRead, W: Write>(
    client: &mut E,
    input: &mut R,
    out: &mut W,
) -> Result<usize> {
    let mut sent = 0;
    while let Some(request) = read_message(input).context("reading request from stdin")? {
        let reply = client.request(&request)?;
        sent += 1;
        writeln!(out, "{}", reply)?;
        if reply.command() == "BYE" {
            break;
        }
    }
    Ok(sent)
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
