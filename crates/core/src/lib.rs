// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tavern-core: event dispatch and module lifecycle for the tavern host
//!
//! This crate provides:
//! - Pattern-matched event subscriptions and ordered, synchronous dispatch
//! - The module lifecycle manager that installs a module's subscriptions
//! - Collaborator traits for module storage and package discovery

pub mod clock;
pub mod discovery;
pub mod events;
pub mod module;
pub mod module_manager;
pub mod operation;
pub mod storage;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use discovery::{DiscoveryError, Package, PackageDiscovery};
pub use events::{
    handler_fn, DispatchError, EventContext, EventDispatcher, EventHandler, EventPattern,
    HandlerError, HandlerRef, HandlerRegistry, InvalidPatternError, Subscription,
    SubscriptionRegistry,
};
pub use module::{Module, ModuleDescriptor, SubscriptionDecl};
pub use module_manager::{ModuleError, ModuleManager};
pub use operation::Operation;
pub use storage::{MemoryModuleStore, ModuleStore, StoreError};
