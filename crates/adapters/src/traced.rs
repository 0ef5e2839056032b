// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced wrappers for consistent observability

use tavern_core::{Module, ModuleStore, StoreError};

/// Wrapper that adds tracing to any ModuleStore
#[derive(Clone)]
pub struct TracedModuleStore<S> {
    inner: S,
}

impl<S> TracedModuleStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: ModuleStore> ModuleStore for TracedModuleStore<S> {
    fn find_by_library(&self, library: &str) -> Result<Option<Module>, StoreError> {
        let result = self.inner.find_by_library(library);
        match &result {
            Ok(found) => tracing::trace!(library, found = found.is_some(), "looked up module"),
            Err(e) => tracing::error!(library, error = %e, "module lookup failed"),
        }
        result
    }

    fn find_all(&self) -> Result<Vec<Module>, StoreError> {
        let result = self.inner.find_all();
        tracing::trace!(count = result.as_ref().map(|v| v.len()).ok(), "listed modules");
        result
    }

    fn save(&self, module: &Module) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.save", library = %module.library);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.save(module);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "module saved"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "save failed"
            ),
        }

        result
    }

    fn delete(&self, module: &Module) -> Result<(), StoreError> {
        let span = tracing::info_span!("store.delete", library = %module.library);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.delete(module);
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "module deleted"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "delete failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
