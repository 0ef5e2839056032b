// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Module lifecycle: install and remove a module's subscriptions as a batch
//!
//! Each library moves `Unregistered -> Registered -> Unregistered`; there is
//! no update in place. Reinstalling means unregister then register.

use crate::clock::Clock;
use crate::discovery::{DiscoveryError, PackageDiscovery};
use crate::events::{InvalidPatternError, Subscription, SubscriptionRegistry};
use crate::module::{Module, ModuleDescriptor};
use crate::storage::{ModuleStore, StoreError};
use std::sync::Mutex;
use thiserror::Error;

/// Errors from module lifecycle operations
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("module already exists: {0}")]
    AlreadyExists(String),

    #[error("module does not exist: {0}")]
    DoesNotExist(String),

    #[error("module {library}: {source}")]
    InvalidPattern {
        library: String,
        #[source]
        source: InvalidPatternError,
    },

    #[error("module {library}: {source}")]
    Store {
        library: String,
        #[source]
        source: StoreError,
    },

    #[error("listing modules: {0}")]
    Listing(#[source] StoreError),

    #[error("module {library}: {source}")]
    Discovery {
        library: String,
        #[source]
        source: DiscoveryError,
    },
}

impl ModuleError {
    fn store(library: &str) -> impl FnOnce(StoreError) -> Self + '_ {
        move |source| ModuleError::Store {
            library: library.to_string(),
            source,
        }
    }
}

/// Keeps installed subscriptions consistent with installed modules
///
/// The manager is the only writer of module records. Register and
/// unregister are serialized with each other.
pub struct ModuleManager<S, C> {
    store: S,
    subscriptions: SubscriptionRegistry,
    clock: C,
    lifecycle: Mutex<()>,
}

impl<S: ModuleStore, C: Clock> ModuleManager<S, C> {
    pub fn new(store: S, subscriptions: SubscriptionRegistry, clock: C) -> Self {
        Self {
            store,
            subscriptions,
            clock,
            lifecycle: Mutex::new(()),
        }
    }

    /// Record a module and install the valid subscriptions it declares.
    ///
    /// Declarations missing a pattern or handler are skipped. Every valid
    /// pattern is compiled before anything is written, so a bad pattern
    /// fails the call with no module record and no subscriptions.
    pub fn register(
        &self,
        library: &str,
        descriptor: &ModuleDescriptor,
    ) -> Result<Module, ModuleError> {
        let _guard = self.lifecycle.lock().unwrap_or_else(|e| e.into_inner());

        if self
            .store
            .find_by_library(library)
            .map_err(ModuleError::store(library))?
            .is_some()
        {
            return Err(ModuleError::AlreadyExists(library.to_string()));
        }

        let subscriptions = compile(library, descriptor)?;

        let module = Module::new(library, self.clock.now());
        self.store
            .save(&module)
            .map_err(ModuleError::store(library))?;

        let count = subscriptions.len();
        for subscription in subscriptions {
            self.subscriptions.add(subscription);
        }

        tracing::info!(library, subscriptions = count, "module registered");
        Ok(module)
    }

    /// Remove the subscriptions a descriptor names and forget the module.
    ///
    /// Only subscriptions named by `descriptor` are removed; if the
    /// module's metadata changed since registration, the ones it no
    /// longer names stay installed.
    pub fn unregister(
        &self,
        library: &str,
        descriptor: &ModuleDescriptor,
    ) -> Result<(), ModuleError> {
        let _guard = self.lifecycle.lock().unwrap_or_else(|e| e.into_inner());

        let module = self
            .store
            .find_by_library(library)
            .map_err(ModuleError::store(library))?
            .ok_or_else(|| ModuleError::DoesNotExist(library.to_string()))?;

        let mut removed = 0;
        for (index, decl) in descriptor.subscriptions.iter().enumerate() {
            match decl.parts() {
                Some((pattern, handler)) => {
                    removed += self.subscriptions.remove(pattern, handler, library);
                }
                None => tracing::debug!(library, index, "skipping malformed subscription"),
            }
        }

        self.store
            .delete(&module)
            .map_err(ModuleError::store(library))?;

        tracing::info!(library, subscriptions = removed, "module unregistered");
        Ok(())
    }

    /// All registered modules, in the store's order
    pub fn modules(&self) -> Result<Vec<Module>, ModuleError> {
        self.store.find_all().map_err(ModuleError::Listing)
    }

    pub fn module(&self, library: &str) -> Result<Option<Module>, ModuleError> {
        self.store
            .find_by_library(library)
            .map_err(ModuleError::store(library))
    }

    /// Re-install subscriptions for every registered module from its
    /// current package metadata. Call once at startup, on an empty
    /// registry.
    ///
    /// Modules whose package is gone are skipped. Returns the number of
    /// subscriptions installed.
    pub fn restore(&self, discovery: &impl PackageDiscovery) -> Result<usize, ModuleError> {
        let _guard = self.lifecycle.lock().unwrap_or_else(|e| e.into_inner());

        let mut restored = 0;
        for module in self.store.find_all().map_err(ModuleError::Listing)? {
            let library = module.library.as_str();
            let package = match discovery.package(library) {
                Ok(package) => package,
                Err(DiscoveryError::LibraryDoesNotExist(_)) => {
                    tracing::warn!(library, "registered module has no installed package");
                    continue;
                }
                Err(source) => {
                    return Err(ModuleError::Discovery {
                        library: library.to_string(),
                        source,
                    })
                }
            };

            for subscription in compile(library, &package.descriptor)? {
                self.subscriptions.add(subscription);
                restored += 1;
            }
        }

        tracing::info!(subscriptions = restored, "subscriptions restored");
        Ok(restored)
    }

    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }
}

/// Build subscriptions for a descriptor's valid declarations, in order
fn compile(library: &str, descriptor: &ModuleDescriptor) -> Result<Vec<Subscription>, ModuleError> {
    let mut subscriptions = Vec::new();
    for (index, decl) in descriptor.subscriptions.iter().enumerate() {
        let Some((pattern, handler)) = decl.parts() else {
            tracing::warn!(library, index, "skipping malformed subscription");
            continue;
        };
        let subscription = Subscription::new(pattern, handler, library).map_err(|source| {
            ModuleError::InvalidPattern {
                library: library.to_string(),
                source,
            }
        })?;
        subscriptions.push(subscription);
    }
    Ok(subscriptions)
}

#[cfg(test)]
#[path = "module_manager_tests.rs"]
mod tests;
