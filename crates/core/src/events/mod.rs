// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event subscription and dispatch
//!
//! This module provides:
//! - `EventPattern` - Regex-style matching of event names
//! - `SubscriptionRegistry` - Ordered set of active subscriptions
//! - `EventDispatcher` - Invoke matching handlers with a shared context
//! - `EventHandler` / `HandlerRegistry` - Handlers resolved by name at dispatch time

mod context;
mod dispatcher;
mod handler;
mod pattern;
mod registry;
mod subscription;

pub use context::EventContext;
pub use dispatcher::{DispatchError, EventDispatcher};
pub use handler::{handler_fn, EventHandler, HandlerError, HandlerRef, HandlerRegistry};
pub use pattern::{matches, EventPattern, InvalidPatternError};
pub use registry::SubscriptionRegistry;
pub use subscription::Subscription;
