// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async framing: a [`LinesCodec`]-based decoder/encoder that yields a
//! [`Message`] for every two lines.

use tokio_util::bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

use crate::message::Message;
use crate::wire::ProtocolError;

/// Per-line limit used by [`MessageCodec::new`].
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Codec for use with `FramedRead`/`FramedWrite`.
///
/// The command line is held until its data line arrives, so a frame is
/// only ever yielded whole.
#[derive(Debug)]
pub struct MessageCodec {
    lines: LinesCodec,
    max_line_length: usize,
    pending: Option<String>,
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::with_max_line_length(DEFAULT_MAX_LINE_LENGTH)
    }

    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_line_length),
            max_line_length,
            pending: None,
        }
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Pair a decoded line with the pending command, or stash it as one.
    fn push_line(&mut self, line: String) -> Option<Message> {
        match self.pending.take() {
            Some(command) => Some(Message::new(command, line)),
            None => {
                self.pending = Some(line);
                None
            }
        }
    }

    fn lines_error(&mut self, err: LinesCodecError) -> ProtocolError {
        self.pending = None;
        match err {
            LinesCodecError::MaxLineLengthExceeded => {
                ProtocolError::LineTooLong { max: self.max_line_length }
            }
            LinesCodecError::Io(e) => ProtocolError::Io(e),
        }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for MessageCodec {
    type Item = Message;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Message>, ProtocolError> {
        loop {
            let line = match self.lines.decode(src) {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(None),
                Err(e) => return Err(self.lines_error(e)),
            };
            if let Some(message) = self.push_line(line) {
                return Ok(Some(message));
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Message>, ProtocolError> {
        loop {
            let line = match self.lines.decode_eof(src) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    return match self.pending.take() {
                        Some(command) => Err(ProtocolError::IncompleteFrame { command }),
                        None => Ok(None),
                    };
                }
                Err(e) => return Err(self.lines_error(e)),
            };
            if let Some(message) = self.push_line(line) {
                return Ok(Some(message));
            }
        }
    }
}

impl Encoder<Message> for MessageCodec {
    type Error = ProtocolError;

    fn encode(&mut self, message: Message, dst: &mut BytesMut) -> Result<(), ProtocolError> {
        let frame = message.to_frame()?;
        dst.reserve(frame.len());
        dst.put_slice(frame.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
