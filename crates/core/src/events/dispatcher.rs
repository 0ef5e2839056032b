// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Synchronous, ordered event dispatch

use super::context::EventContext;
use super::handler::{HandlerError, HandlerRegistry};
use super::registry::SubscriptionRegistry;
use super::subscription::Subscription;
use thiserror::Error;

/// Errors that abort a dispatch call
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The subscription names a handler nobody registered; the module
    /// that installed it is corrupt or incompletely installed
    #[error("event {event}: cannot resolve handler for subscription {subscription}")]
    HandlerResolution {
        event: String,
        subscription: Subscription,
    },
    #[error("event {event}: handler failed for subscription {subscription}: {source}")]
    Handler {
        event: String,
        subscription: Subscription,
        #[source]
        source: HandlerError,
    },
}

/// Routes events to the handlers of matching subscriptions
#[derive(Clone, Debug)]
pub struct EventDispatcher {
    subscriptions: SubscriptionRegistry,
    handlers: HandlerRegistry,
}

impl EventDispatcher {
    pub fn new(subscriptions: SubscriptionRegistry, handlers: HandlerRegistry) -> Self {
        Self {
            subscriptions,
            handlers,
        }
    }

    /// Invoke every matching handler in registration order, threading
    /// the context through each one.
    ///
    /// No match returns the context untouched. The first failure stops
    /// the chain; handlers already invoked are not rolled back.
    pub fn dispatch(
        &self,
        event: &str,
        mut context: EventContext,
    ) -> Result<EventContext, DispatchError> {
        let matched = self.subscriptions.lookup(event);
        if matched.is_empty() {
            tracing::trace!(event, "no subscribers");
            return Ok(context);
        }

        let span = tracing::debug_span!("dispatch", event, subscribers = matched.len());
        let _guard = span.enter();

        for subscription in matched {
            let Some(handler) = self.handlers.resolve(&subscription.handler) else {
                tracing::error!(subscription = %subscription, "handler not found");
                return Err(DispatchError::HandlerResolution {
                    event: event.to_string(),
                    subscription,
                });
            };

            context = match handler.handle(event, context) {
                Ok(context) => context,
                Err(source) => {
                    tracing::error!(subscription = %subscription, error = %source, "handler failed");
                    return Err(DispatchError::Handler {
                        event: event.to_string(),
                        subscription,
                        source,
                    });
                }
            };
        }

        Ok(context)
    }

    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
