// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking TCP client: one request envelope out, one reply envelope back.

use std::io::BufReader;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use lw_wire::{write_message, Message, ProtocolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not resolve {0}")]
    Resolve(String),

    #[error("could not connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("daemon closed the connection")]
    Closed,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

pub struct Client {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl Client {
    /// Connect to `addr`, applying `timeout` to the connect and to every
    /// subsequent read and write.
    pub fn connect(addr: &str, timeout: Duration) -> Result<Self, ClientError> {
        let resolved = addr
            .to_socket_addrs()
            .map_err(|_| ClientError::Resolve(addr.to_string()))?
            .next()
            .ok_or_else(|| ClientError::Resolve(addr.to_string()))?;

        let stream = TcpStream::connect_timeout(&resolved, timeout)
            .map_err(|source| ClientError::Connect { addr: resolved, source })?;
        let configure = |stream: &TcpStream| -> std::io::Result<()> {
            stream.set_read_timeout(Some(timeout))?;
            stream.set_write_timeout(Some(timeout))?;
            stream.set_nodelay(true)
        };
        configure(&stream).map_err(ProtocolError::from)?;

        let writer = stream.try_clone().map_err(ProtocolError::from)?;
        Ok(Self { reader: BufReader::new(stream), writer })
    }

    /// Send `request` and wait for the reply.
    pub fn request(&mut self, request: &Message) -> Result<Message, ClientError> {
        write_message(&mut self.writer, request)?;
        match Message::read_from(&mut self.reader) {
            Ok(reply) => Ok(reply),
            Err(ProtocolError::ConnectionClosed) => Err(ClientError::Closed),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
