// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking framing over `BufRead`/`Write` and JSON payload helpers.

use std::io::{BufRead, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::codec::DEFAULT_MAX_LINE_LENGTH;
use crate::message::{Field, Message};

/// Errors raised while framing or unframing messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Incomplete frame: stream ended after command {command:?}")]
    IncompleteFrame { command: String },

    #[error("Line break in {field} field")]
    EmbeddedNewline { field: Field },

    #[error("Line exceeds {max} bytes")]
    LineTooLong { max: usize },

    #[error("Read timed out")]
    Timeout,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read one message from `reader`.
///
/// Returns `Ok(None)` when the stream ends cleanly before a frame starts,
/// and [`ProtocolError::IncompleteFrame`] when it ends between the command
/// and data lines. Blocks until both lines are available. Lines longer than
/// [`DEFAULT_MAX_LINE_LENGTH`] are rejected.
pub fn read_message<R: BufRead>(reader: &mut R) -> Result<Option<Message>, ProtocolError> {
    read_message_with_limit(reader, DEFAULT_MAX_LINE_LENGTH)
}

/// [`read_message`] with a caller-chosen per-line limit, matching
/// [`MessageCodec::with_max_line_length`](crate::MessageCodec::with_max_line_length).
pub fn read_message_with_limit<R: BufRead>(
    reader: &mut R,
    max_line_length: usize,
) -> Result<Option<Message>, ProtocolError> {
    let Some(command) = read_line(reader, max_line_length)? else {
        return Ok(None);
    };
    let Some(data) = read_line(reader, max_line_length)? else {
        return Err(ProtocolError::IncompleteFrame { command });
    };
    Ok(Some(Message::new(command, data)))
}

/// Write `message` as a two-line frame and flush.
///
/// Nothing is written if either field contains a line break.
pub fn write_message<W: Write>(writer: &mut W, message: &Message) -> Result<(), ProtocolError> {
    let frame = message.to_frame()?;
    writer.write_all(frame.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Encode a value as a single-line JSON payload.
pub fn encode<T: Serialize>(value: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a JSON payload produced by [`encode`].
pub fn decode<T: DeserializeOwned>(data: &str) -> Result<T, ProtocolError> {
    Ok(serde_json::from_str(data)?)
}

/// Read a line with its terminator (`\n` or `\r\n`) stripped.
///
/// Follows `LinesCodec`: a trailing line without a terminator still counts
/// (minus one trailing `\r`), a lone unterminated `\r` does not, and more
/// than `max` bytes before the `\n` is [`ProtocolError::LineTooLong`].
fn read_line<R: BufRead>(reader: &mut R, max: usize) -> Result<Option<String>, ProtocolError> {
    let mut buf = Vec::new();
    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
    reader.by_ref().take(limit).read_until(b'\n', &mut buf)?;

    if buf.last() == Some(&b'\n') {
        buf.pop();
    } else if buf.len() > max {
        return Err(ProtocolError::LineTooLong { max });
    } else if buf.is_empty() || buf == b"\r" {
        return Ok(None);
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    String::from_utf8(buf).map(Some).map_err(|e| {
        ProtocolError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
