// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory module store

use super::{ModuleStore, StoreError};
use crate::module::Module;
use std::sync::{Arc, Mutex};

/// Insertion-ordered in-memory store; clones share state
#[derive(Clone, Default, Debug)]
pub struct MemoryModuleStore {
    modules: Arc<Mutex<Vec<Module>>>,
}

impl MemoryModuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with modules, in the given order
    pub fn with_modules(modules: impl IntoIterator<Item = Module>) -> Self {
        Self {
            modules: Arc::new(Mutex::new(modules.into_iter().collect())),
        }
    }
}

impl ModuleStore for MemoryModuleStore {
    fn find_by_library(&self, library: &str) -> Result<Option<Module>, StoreError> {
        let modules = self.modules.lock().unwrap_or_else(|e| e.into_inner());
        Ok(modules.iter().find(|m| m.library == library).cloned())
    }

    fn find_all(&self) -> Result<Vec<Module>, StoreError> {
        Ok(self.modules.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, module: &Module) -> Result<(), StoreError> {
        let mut modules = self.modules.lock().unwrap_or_else(|e| e.into_inner());
        match modules.iter_mut().find(|m| m.library == module.library) {
            Some(existing) => *existing = module.clone(),
            None => modules.push(module.clone()),
        }
        Ok(())
    }

    fn delete(&self, module: &Module) -> Result<(), StoreError> {
        let mut modules = self.modules.lock().unwrap_or_else(|e| e.into_inner());
        modules.retain(|m| m.library != module.library);
        Ok(())
    }
}
