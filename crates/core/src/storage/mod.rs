// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage collaborator for module records

mod memory;

pub use memory::MemoryModuleStore;

use crate::module::Module;
use thiserror::Error;

/// Errors surfaced by a module store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("module store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

/// Durable home of module records
///
/// Each call is assumed to be atomic on its own; nothing spans calls.
pub trait ModuleStore: Send + Sync {
    fn find_by_library(&self, library: &str) -> Result<Option<Module>, StoreError>;

    /// All modules in the store's natural order (creation order for the
    /// stores in this workspace)
    fn find_all(&self) -> Result<Vec<Module>, StoreError>;

    /// Insert a module, replacing any record with the same library
    fn save(&self, module: &Module) -> Result<(), StoreError>;

    /// Remove a module; deleting an absent record is a no-op
    fn delete(&self, module: &Module) -> Result<(), StoreError>;
}
