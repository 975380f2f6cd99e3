// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests for framing: any line-break-free pair survives both the
//! blocking and the codec paths, concatenated frames stay separated, and
//! both paths read arbitrary input the same way.

use std::io::Cursor;

use proptest::prelude::*;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;

use super::*;

fn arb_field() -> impl Strategy<Value = String> {
    "[^\r\n]{0,64}"
}

fn arb_message() -> impl Strategy<Value = Message> {
    (arb_field(), arb_field()).prop_map(|(c, d)| Message::new(c, d))
}

/// Messages read before the stream ended, plus the error that ended it.
type Outcome = (Vec<Message>, Option<&'static str>);

fn error_kind(err: &ProtocolError) -> &'static str {
    match err {
        ProtocolError::Io(_) => "io",
        ProtocolError::ConnectionClosed => "closed",
        ProtocolError::IncompleteFrame { .. } => "incomplete",
        ProtocolError::EmbeddedNewline { .. } => "newline",
        ProtocolError::LineTooLong { .. } => "too-long",
        ProtocolError::Timeout => "timeout",
        ProtocolError::Json(_) => "json",
    }
}

fn read_blocking(input: &str, max: usize) -> Outcome {
    let mut cursor = Cursor::new(input);
    let mut messages = Vec::new();
    loop {
        match read_message_with_limit(&mut cursor, max) {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => return (messages, None),
            Err(e) => return (messages, Some(error_kind(&e))),
        }
    }
}

fn read_codec(input: &str, max: usize) -> Outcome {
    let mut codec = MessageCodec::with_max_line_length(max);
    let mut buf = BytesMut::from(input);
    let mut messages = Vec::new();
    loop {
        match codec.decode_eof(&mut buf) {
            Ok(Some(message)) => messages.push(message),
            Ok(None) => return (messages, None),
            Err(e) => return (messages, Some(error_kind(&e))),
        }
    }
}

proptest! {
    #[test]
    fn blocking_and_codec_agree_on_raw_input(input in "[ab\r\n]{0,40}", max in 1usize..12) {
        prop_assert_eq!(read_blocking(&input, max), read_codec(&input, max));
    }

    #[test]
    fn blocking_reader_recovers_fields(message in arb_message()) {
        let mut buffer = Vec::new();
        write_message(&mut buffer, &message).expect("write");
        let decoded = read_message(&mut Cursor::new(buffer)).expect("read").expect("frame");
        prop_assert_eq!(decoded, message);
    }

    #[test]
    fn codec_matches_blocking_reader(messages in proptest::collection::vec(arb_message(), 0..8)) {
        let mut buffer = Vec::new();
        for message in &messages {
            write_message(&mut buffer, message).expect("write");
        }

        let mut codec = MessageCodec::new();
        let mut buf = BytesMut::from(&buffer[..]);
        let mut decoded = Vec::new();
        while let Some(message) = codec.decode_eof(&mut buf).expect("decode") {
            decoded.push(message);
        }

        let mut cursor = Cursor::new(buffer);
        let mut blocking = Vec::new();
        while let Some(message) = read_message(&mut cursor).expect("read") {
            blocking.push(message);
        }

        prop_assert_eq!(&decoded, &messages);
        prop_assert_eq!(&blocking, &messages);
    }

    #[test]
    fn try_new_rejects_any_line_break(prefix in arb_field(), suffix in arb_field(), brk in "[\r\n]") {
        let data = format!("{}{}{}", prefix, brk, suffix);
        prop_assert!(Message::try_new("ECHO", data).is_err());
    }
}
