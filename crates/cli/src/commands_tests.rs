// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Cursor;

use super::*;

/// Replies PONG/BYE/ERR by command and records every request.
#[derive(Default)]
struct FakeDaemon {
    seen: Vec<Message>,
}

impl Exchange for FakeDaemon {
    fn request(&mut self, request: &Message) -> Result<Message, ClientError> {
        self.seen.push(request.clone());
        Ok(match request.command() {
            "PING" => Message::new("PONG", request.data()),
            "QUIT" => Message::new("BYE", ""),
            other => Message::new("ERR", format!("unknown command: {}", other)),
        })
    }
}

fn printed(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

#[test]
fn send_prints_reply() {
    let mut daemon = FakeDaemon::default();
    let mut out = Vec::new();
    send(&mut daemon, Message::new("PING", "hi"), &mut out).unwrap();
    assert_eq!(printed(out), "PONG hi\n");
    assert_eq!(daemon.seen, vec![Message::new("PING", "hi")]);
}

#[test]
fn send_err_reply_maps_to_exit_code_one() {
    let mut daemon = FakeDaemon::default();
    let mut out = Vec::new();
    let err = send(&mut daemon, Message::new("FLY", ""), &mut out).unwrap_err();
    let exit = err.downcast_ref::<ExitError>().expect("ExitError");
    assert_eq!(exit.code, EXIT_REMOTE_ERROR);
    assert_eq!(exit.message, "unknown command: FLY");
    assert!(out.is_empty());
}

#[test]
fn send_refuses_unframeable_request() {
    let mut daemon = FakeDaemon::default();
    let mut out = Vec::new();
    assert!(send(&mut daemon, Message::new("ECHO", "a\nb"), &mut out).is_err());
    assert!(daemon.seen.is_empty());
}

#[test]
fn repl_sends_every_frame_until_end_of_input() {
    let mut daemon = FakeDaemon::default();
    let mut input = Cursor::new("PING\none\nPING\n\n");
    let mut out = Vec::new();

    let sent = repl(&mut daemon, &mut input, &mut out).unwrap();
    assert_eq!(sent, 2);
    assert_eq!(printed(out), "PONG one\nPONG\n");
}

#[test]
fn repl_stops_at_bye() {
    let mut daemon = FakeDaemon::default();
    let mut input = Cursor::new("QUIT\n\nPING\n\n");
    let mut out = Vec::new();

    let sent = repl(&mut daemon, &mut input, &mut out).unwrap();
    assert_eq!(sent, 1);
    assert_eq!(printed(out), "BYE\n");
}

#[test]
fn repl_accepts_crlf_input_without_final_newline() {
    let mut daemon = FakeDaemon::default();
    let mut input = Cursor::new("PING\r\none\r");
    let mut out = Vec::new();

    let sent = repl(&mut daemon, &mut input, &mut out).unwrap();
    assert_eq!(sent, 1);
    assert_eq!(daemon.seen, vec![Message::new("PING", "one")]);
    assert_eq!(printed(out), "PONG one\n");
}

#[test]
fn repl_reports_truncated_input() {
    let mut daemon = FakeDaemon::default();
    let mut input = Cursor::new("PING\n\nPING\n");
    let mut out = Vec::new();

    let err = repl(&mut daemon, &mut input, &mut out).unwrap_err();
    assert!(format!("{:#}", err).contains("Incomplete frame"), "unexpected error: {:#}", err);
    assert_eq!(daemon.seen.len(), 1);
}
