// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installed modules and the subscriptions they declare

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Durable record of one installed module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Globally unique library name, e.g. "vendor/name"
    pub library: String,
    pub created_at: DateTime<Utc>,
}

impl Module {
    pub fn new(library: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            library: library.into(),
            created_at,
        }
    }
}

/// One raw subscription declaration from package metadata
///
/// Either field may be missing; such declarations are skipped by the
/// module manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, alias = "class", skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
}

impl SubscriptionDecl {
    pub fn new(pattern: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            handler: Some(handler.into()),
        }
    }

    /// A declaration carrying neither field
    pub fn malformed() -> Self {
        Self::default()
    }

    /// Pattern and handler, if both are present
    pub fn parts(&self) -> Option<(&str, &str)> {
        match (&self.pattern, &self.handler) {
            (Some(pattern), Some(handler)) => Some((pattern.as_str(), handler.as_str())),
            _ => None,
        }
    }

    fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            pattern: field("pattern"),
            handler: field("handler").or_else(|| field("class")),
        }
    }
}

/// Ordered subscription declarations for one library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    pub subscriptions: Vec<SubscriptionDecl>,
}

impl ModuleDescriptor {
    pub fn new(subscriptions: Vec<SubscriptionDecl>) -> Self {
        Self { subscriptions }
    }

    /// Read declarations from a package's `extra` metadata object.
    ///
    /// A missing or non-array `subscriptions` key is an empty descriptor.
    /// Entries that are not objects or carry non-string fields become
    /// malformed entries rather than failing the whole package.
    pub fn from_extra(extra: &Value) -> Self {
        let subscriptions = extra
            .get("subscriptions")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(SubscriptionDecl::from_value).collect())
            .unwrap_or_default();
        Self { subscriptions }
    }

    /// Declarations with both a pattern and a handler, in order
    pub fn valid(&self) -> impl Iterator<Item = (&str, &str)> {
        self.subscriptions.iter().filter_map(SubscriptionDecl::parts)
    }
}

impl<'de> Deserialize<'de> for ModuleDescriptor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_extra(&Value::deserialize(deserializer)?))
    }
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
