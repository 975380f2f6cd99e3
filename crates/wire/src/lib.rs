// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line protocol envelope and framing.
//!
//! Wire format: two newline-terminated lines per message
//!
//! ```text
//! <command>\n
//! <data>\n
//! ```

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod codec;
mod message;
mod wire;

pub use codec::{MessageCodec, DEFAULT_MAX_LINE_LENGTH};
pub use message::{Field, Message};
pub use wire::{
    decode, encode, read_message, read_message_with_limit, write_message, ProtocolError,
};

#[cfg(test)]
mod property_tests;
