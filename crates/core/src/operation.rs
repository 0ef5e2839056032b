// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operations for the write-ahead log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operations that can be persisted to the WAL
///
/// Only module records are logged; subscriptions are rebuilt from
/// package metadata on startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Record an installed module
    ModuleCreate {
        library: String,
        created_at: DateTime<Utc>,
    },

    /// Forget an installed module
    ModuleDelete { library: String },
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
