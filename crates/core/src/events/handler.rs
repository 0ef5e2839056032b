// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler capability and late-bound handler lookup

use super::context::EventContext;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors raised by a handler while processing an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("expected context key '{key}'")]
    MissingKey { key: String },
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    pub fn missing_key(key: impl Into<String>) -> Self {
        HandlerError::MissingKey { key: key.into() }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        HandlerError::Failed(msg.into())
    }
}

/// Something that reacts to dispatched events
///
/// A handler may add, overwrite or remove context entries and must hand
/// the context back. It must not keep a reference to the context past
/// the call.
pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &str, context: EventContext) -> Result<EventContext, HandlerError>;
}

impl<F> EventHandler for F
where
    F: Fn(&str, EventContext) -> Result<EventContext, HandlerError> + Send + Sync,
{
    fn handle(&self, event: &str, context: EventContext) -> Result<EventContext, HandlerError> {
        self(event, context)
    }
}

/// Pin a closure's signature so it can be registered as a handler
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&str, EventContext) -> Result<EventContext, HandlerError> + Send + Sync,
{
    f
}

/// Name a subscription uses to refer to its handler
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HandlerRef(pub String);

impl HandlerRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps handler references to live handlers, resolved at dispatch time
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Arc<RwLock<HashMap<HandlerRef, Arc<dyn EventHandler>>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to a name, replacing any previous binding
    pub fn register(&self, name: impl Into<String>, handler: impl EventHandler + 'static) {
        let name = HandlerRef::new(name);
        tracing::debug!(handler = %name, "handler registered");
        self.handlers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name, Arc::new(handler));
    }

    pub fn resolve(&self, name: &HandlerRef) -> Option<Arc<dyn EventHandler>> {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &HandlerRef) -> bool {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.len())
            .finish()
    }
}
