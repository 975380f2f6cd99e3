// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line protocol daemon library
//!
//! Exposes the listener, configuration, and store so the `lwd` binary and
//! integration tests share one implementation.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod env;
pub mod lifecycle;
pub mod listener;
pub mod logging;
pub mod store;

pub use lifecycle::{Config, LifecycleError};
pub use listener::{Command, Listener, ServerInfo};
pub use store::Store;
