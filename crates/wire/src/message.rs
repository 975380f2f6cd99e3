// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The (command, data) envelope exchanged over the line protocol.

use std::fmt;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::wire::{read_message, ProtocolError};

/// One of the two lines of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Command,
    Data,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Command => write!(f, "command"),
            Field::Data => write!(f, "data"),
        }
    }
}

/// A single protocol unit: the requested operation and its payload.
///
/// Both fields hold the literal content of one line with the delimiting
/// newline removed. Once built, a message is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    command: String,
    data: String,
}

impl Message {
    /// Build a message from two literal fields, stored verbatim.
    ///
    /// No validation happens here; a field carrying a line break is only
    /// rejected when the message is written. Use [`Message::try_new`] to
    /// check up front.
    pub fn new(command: impl Into<String>, data: impl Into<String>) -> Self {
        Self { command: command.into(), data: data.into() }
    }

    /// Build a message, rejecting fields that would corrupt the framing.
    pub fn try_new(
        command: impl Into<String>,
        data: impl Into<String>,
    ) -> Result<Self, ProtocolError> {
        let message = Self::new(command, data);
        message.validate()?;
        Ok(message)
    }

    /// Read exactly two lines from `reader` into a new message.
    ///
    /// End of stream before the command line is reported as
    /// [`ProtocolError::ConnectionClosed`]; use [`read_message`] to get it
    /// as `Ok(None)` instead.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ProtocolError> {
        read_message(reader)?.ok_or(ProtocolError::ConnectionClosed)
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn into_parts(self) -> (String, String) {
        (self.command, self.data)
    }

    /// Check that neither field contains a line break.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        for (field, value) in [(Field::Command, &self.command), (Field::Data, &self.data)] {
            if value.contains(['\n', '\r']) {
                return Err(ProtocolError::EmbeddedNewline { field });
            }
        }
        Ok(())
    }

    /// Render the two-line frame for this message.
    pub fn to_frame(&self) -> Result<String, ProtocolError> {
        self.validate()?;
        Ok(format!("{}\n{}\n", self.command, self.data))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            write!(f, "{}", self.command)
        } else {
            write!(f, "{} {}", self.command, self.data)
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
