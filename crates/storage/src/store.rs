// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable module store backed by the WAL

use crate::state::MaterializedState;
use crate::wal::{Wal, WalError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tavern_core::{Module, ModuleStore, Operation, StoreError};

/// Module store that logs every write before applying it
///
/// Opening replays the log into memory; reads never touch disk.
pub struct WalModuleStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    wal: Wal,
    state: MaterializedState,
}

impl WalModuleStore {
    /// Open or create the store at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, WalError> {
        let path = path.into();
        let ops = Wal::replay(&path)?;
        let wal = Wal::open(&path)?;
        let state = MaterializedState::from_operations(&ops);

        tracing::debug!(
            path = %path.display(),
            entries = wal.sequence(),
            modules = state.modules.len(),
            "module store opened"
        );

        Ok(Self {
            path,
            inner: Mutex::new(Inner { wal, state }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn commit(&self, op: Operation) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.wal.append(&op).map_err(StoreError::backend)?;
        inner.state.apply(&op);
        Ok(())
    }
}

impl ModuleStore for WalModuleStore {
    fn find_by_library(&self, library: &str) -> Result<Option<Module>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.state.get_module(library).cloned())
    }

    fn find_all(&self) -> Result<Vec<Module>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.state.modules.clone())
    }

    fn save(&self, module: &Module) -> Result<(), StoreError> {
        self.commit(Operation::ModuleCreate {
            library: module.library.clone(),
            created_at: module.created_at,
        })
    }

    fn delete(&self, module: &Module) -> Result<(), StoreError> {
        self.commit(Operation::ModuleDelete {
            library: module.library.clone(),
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
