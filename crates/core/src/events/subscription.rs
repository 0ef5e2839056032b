// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routing rules from event patterns to handlers

use super::handler::HandlerRef;
use super::pattern::{EventPattern, InvalidPatternError};
use std::fmt;

/// One routing rule, installed on behalf of a module
///
/// The (pattern, handler, library) triple is the subscription's identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub pattern: EventPattern,
    pub handler: HandlerRef,
    /// Library of the module that installed this subscription
    pub library: String,
}

impl Subscription {
    pub fn new(
        pattern: &str,
        handler: impl Into<String>,
        library: impl Into<String>,
    ) -> Result<Self, InvalidPatternError> {
        Ok(Self {
            pattern: EventPattern::parse(pattern)?,
            handler: HandlerRef::new(handler),
            library: library.into(),
        })
    }

    /// Check if the pattern matches the event
    pub fn matches(&self, event_name: &str) -> bool {
        self.pattern.matches(event_name)
    }

    /// Check whether all three identity fields equal the given ones
    pub fn is(&self, pattern: &str, handler: &str, library: &str) -> bool {
        self.pattern.as_str() == pattern
            && self.handler.as_str() == handler
            && self.library == library
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.pattern.as_str(),
            self.handler,
            self.library
        )
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
