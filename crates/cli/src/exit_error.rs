// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

/// Exit code when the request reached the daemon and it replied `ERR`
/// (unknown command, malformed `SET`, ...). The reply data is printed to
/// stderr.
pub const EXIT_REMOTE_ERROR: u8 = 1;

/// Exit code for everything that is not an `ERR` reply: address
/// resolution, connect, socket timeouts, and framing errors on either side
/// (`ClientError`, `ProtocolError`). `main()` uses it for any error that is
/// not an [`ExitError`].
pub const EXIT_TRANSPORT_ERROR: u8 = 2;

#[derive(Debug)]
pub struct ExitError {
    pub code: u8,
    pub message: String,
}

impl ExitError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
