// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tavern-host: configuration, logging, and the explicitly wired host

pub mod config;
pub mod host;
pub mod logging;

pub use config::{Config, ConfigError, CONFIG_FILE};
pub use host::{version, Host, HostError, HostStore};
pub use logging::LoggingError;
