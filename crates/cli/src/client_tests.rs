// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::BufReader;
use std::net::TcpListener;
use std::thread;

use lw_wire::read_message;

use super::*;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Serve one connection, answering each request with `reply(request)`,
/// closing after `limit` requests.
fn serve<F>(limit: usize, reply: F) -> (String, thread::JoinHandle<()>)
where
    F: Fn(&Message) -> Message + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut writer = stream.try_clone().unwrap();
        let mut reader = BufReader::new(stream);
        for _ in 0..limit {
            let Some(request) = read_message(&mut reader).unwrap() else {
                return;
            };
            write_message(&mut writer, &reply(&request)).unwrap();
        }
    });
    (addr, handle)
}

#[test]
fn request_returns_reply() {
    let (addr, server) = serve(2, |req| Message::new("ECHO", req.data()));
    let mut client = Client::connect(&addr, TIMEOUT).unwrap();

    let first = client.request(&Message::new("ECHO", "one")).unwrap();
    let second = client.request(&Message::new("ECHO", "two")).unwrap();
    assert_eq!(first, Message::new("ECHO", "one"));
    assert_eq!(second, Message::new("ECHO", "two"));

    server.join().unwrap();
}

#[test]
fn request_after_server_hangs_up_is_closed() {
    let (addr, server) = serve(0, |req| req.clone());
    let mut client = Client::connect(&addr, TIMEOUT).unwrap();
    server.join().unwrap();

    match client.request(&Message::new("PING", "")) {
        Err(ClientError::Closed) | Err(ClientError::Protocol(ProtocolError::Io(_))) => {}
        other => panic!("expected closed connection, got {:?}", other),
    }
}

#[test]
fn request_with_line_break_is_not_sent() {
    let (addr, server) = serve(1, |req| req.clone());
    let mut client = Client::connect(&addr, TIMEOUT).unwrap();

    let err = client.request(&Message::new("ECHO", "a\nb")).unwrap_err();
    assert!(matches!(err, ClientError::Protocol(ProtocolError::EmbeddedNewline { .. })));

    drop(client);
    server.join().unwrap();
}

#[test]
fn connect_refused_reports_address() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    match Client::connect(&addr.to_string(), TIMEOUT) {
        Err(ClientError::Connect { addr: reported, .. }) => assert_eq!(reported, addr),
        Err(other) => panic!("expected Connect error, got {:?}", other),
        Ok(_) => panic!("connect should fail"),
    }
}

#[test]
fn unresolvable_address_is_resolve_error() {
    assert!(matches!(
        Client::connect("not an address", TIMEOUT),
        Err(ClientError::Resolve(_))
    ));
}
