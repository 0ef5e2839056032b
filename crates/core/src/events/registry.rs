// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of active subscriptions

use super::subscription::Subscription;
use std::sync::{Arc, RwLock};

/// Ordered set of active subscriptions
///
/// Registration order is dispatch order. Lookups share a read lock and
/// return a snapshot; `add`/`remove` take the write lock, so a lookup
/// sees the registry either before or after a mutation. Clones share
/// state.
#[derive(Clone, Default, Debug)]
pub struct SubscriptionRegistry {
    subscriptions: Arc<RwLock<Vec<Subscription>>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscription; callers are responsible for not adding
    /// the same identity twice
    pub fn add(&self, subscription: Subscription) {
        tracing::debug!(
            pattern = subscription.pattern.as_str(),
            handler = %subscription.handler,
            library = %subscription.library,
            "subscribed"
        );
        self.subscriptions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(subscription);
    }

    /// Remove every subscription with exactly this identity.
    /// Returns how many were removed; zero is not an error.
    pub fn remove(&self, pattern: &str, handler: &str, library: &str) -> usize {
        let mut subs = self.subscriptions.write().unwrap_or_else(|e| e.into_inner());
        let before = subs.len();
        subs.retain(|s| !s.is(pattern, handler, library));
        let removed = before - subs.len();

        tracing::debug!(pattern, handler, library, removed, "unsubscribed");
        removed
    }

    /// Subscriptions whose pattern matches the event, in registration order
    pub fn lookup(&self, event_name: &str) -> Vec<Subscription> {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|s| s.matches(event_name))
            .cloned()
            .collect()
    }

    /// All subscriptions, in registration order
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Subscriptions installed by one library, in registration order
    pub fn subscriptions_for(&self, library: &str) -> Vec<Subscription> {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|s| s.library == library)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscriptions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
