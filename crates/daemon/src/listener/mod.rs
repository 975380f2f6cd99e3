// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for handling socket I/O.
//!
//! Accepts TCP connections and spawns one task per connection. Each task
//! reads envelopes off the socket, dispatches them, and writes exactly one
//! reply envelope per request.

mod commands;

pub use commands::{Command, ServerInfo};

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use lw_wire::{MessageCodec, ProtocolError};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_util::codec::{FramedRead, FramedWrite};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::lifecycle::{Config, LifecycleError};
use crate::store::Store;

use commands::{error_reply, After};

/// Shared daemon context for all connection handlers.
pub(crate) struct ListenCtx {
    pub store: Store,
    pub start_time: Instant,
    pub shutdown: CancellationToken,
    pub idle_timeout: Duration,
    pub max_line_length: usize,
    /// Connections currently open
    pub active: AtomicUsize,
    /// Connections accepted since startup
    pub total: AtomicU64,
}

impl ListenCtx {
    pub fn new(config: &Config) -> Self {
        Self {
            store: Store::new(),
            start_time: Instant::now(),
            shutdown: CancellationToken::new(),
            idle_timeout: config.idle_timeout,
            max_line_length: config.max_line_length,
            active: AtomicUsize::new(0),
            total: AtomicU64::new(0),
        }
    }
}

/// Counts a connection as open until dropped.
struct ConnectionGuard(Arc<ListenCtx>);

impl ConnectionGuard {
    fn open(ctx: &Arc<ListenCtx>) -> Self {
        ctx.active.fetch_add(1, Ordering::Relaxed);
        ctx.total.fetch_add(1, Ordering::Relaxed);
        Self(Arc::clone(ctx))
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.active.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Listener task for accepting socket connections.
pub struct Listener {
    tcp: TcpListener,
    ctx: Arc<ListenCtx>,
    drain_timeout: Duration,
}

impl Listener {
    /// Bind the TCP socket described by `config`.
    pub async fn bind(config: &Config) -> Result<Self, LifecycleError> {
        let tcp = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|e| LifecycleError::BindFailed(config.bind_addr, e))?;
        Ok(Self {
            tcp,
            ctx: Arc::new(ListenCtx::new(config)),
            drain_timeout: config.drain_timeout,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.tcp.local_addr()
    }

    /// Token that stops the listener when cancelled. `SHUTDOWN` requests
    /// cancel the same token.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.ctx.shutdown.clone()
    }

    /// Run the accept loop until shutdown, then wait (up to the drain
    /// timeout) for open connections to finish.
    pub async fn run(self) {
        let tracker = TaskTracker::new();
        loop {
            tokio::select! {
                _ = self.ctx.shutdown.cancelled() => break,
                result = self.tcp.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            debug!("TCP connection from {}", addr);
                            let guard = ConnectionGuard::open(&self.ctx);
                            let ctx = Arc::clone(&self.ctx);
                            tracker.spawn(async move {
                                let _guard = guard;
                                let (reader, writer) = stream.into_split();
                                if let Err(e) = handle_connection(reader, writer, &ctx).await {
                                    log_connection_error(e);
                                }
                            });
                        }
                        Err(e) => error!("TCP accept error: {}", e),
                    }
                }
            }
        }

        tracker.close();
        info!(open = tracker.len(), "listener stopped, draining connections");
        if tokio::time::timeout(self.drain_timeout, tracker.wait()).await.is_err() {
            warn!(open = tracker.len(), "drain timeout elapsed");
        }
    }
}

fn log_connection_error(e: ProtocolError) {
    match e {
        ProtocolError::ConnectionClosed => debug!("Client disconnected"),
        ProtocolError::Timeout => warn!("Connection timeout"),
        ProtocolError::IncompleteFrame { .. } | ProtocolError::LineTooLong { .. } => {
            warn!("Protocol violation: {}", e)
        }
        _ => error!("Connection error: {}", e),
    }
}

/// Handle a single client connection until it closes, idles out, sends
/// `QUIT`/`SHUTDOWN`, or the daemon shuts down.
///
/// Generic over reader/writer types so tests can drive it with in-memory
/// streams.
pub(crate) async fn handle_connection<R, W>(
    reader: R,
    writer: W,
    ctx: &ListenCtx,
) -> Result<(), ProtocolError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut frames =
        FramedRead::new(reader, MessageCodec::with_max_line_length(ctx.max_line_length));
    let mut replies = FramedWrite::new(writer, MessageCodec::new());

    loop {
        let next = tokio::select! {
            _ = ctx.shutdown.cancelled() => {
                debug!("Daemon shutting down, closing connection");
                return Ok(());
            }
            next = tokio::time::timeout(ctx.idle_timeout, frames.next()) => next,
        };

        let request = match next {
            Err(_) => return Err(ProtocolError::Timeout),
            Ok(None) => return Err(ProtocolError::ConnectionClosed),
            Ok(Some(Ok(request))) => request,
            Ok(Some(Err(e))) => {
                if matches!(
                    e,
                    ProtocolError::IncompleteFrame { .. } | ProtocolError::LineTooLong { .. }
                ) {
                    // Best effort: the peer may already be gone
                    let _ = replies.send(error_reply(e.to_string())).await;
                }
                return Err(e);
            }
        };

        debug!(command = request.command(), data_len = request.data().len(), "received request");

        let (reply, after) = commands::dispatch(request, ctx);

        debug!("Sending reply: {}", reply);
        replies.send(reply).await?;

        match after {
            After::Continue => {}
            After::Close => return Ok(()),
            After::Shutdown => {
                info!("shutdown requested by client");
                ctx.shutdown.cancel();
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
#[path = "../listener_tests.rs"]
mod tests;
