// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The host: explicitly wired registries, dispatcher, and module manager

use crate::config::Config;
use fs2::FileExt;
use std::fs::File;
use std::io::Write;
use tavern_adapters::{ManifestDiscovery, TracedModuleStore};
use tavern_core::{
    DiscoveryError, DispatchError, EventContext, EventDispatcher, HandlerRegistry, Module,
    ModuleError, ModuleManager, PackageDiscovery, SubscriptionRegistry, SystemClock,
};
use tavern_storage::{WalError, WalModuleStore};
use thiserror::Error;

/// Module store used by the host (WAL-backed, wrapped with tracing)
pub type HostStore = TracedModuleStore<WalModuleStore>;

/// Host errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to acquire lock: host already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAL error: {0}")]
    Wal(#[from] WalError),

    #[error(transparent)]
    Module(#[from] ModuleError),

    #[error("discovering packages: {0}")]
    Discovery(#[from] DiscoveryError),
}

/// A running host
///
/// Owns the state directory lock for its lifetime. Everything else is
/// reachable through accessors; nothing is global.
pub struct Host<D = ManifestDiscovery> {
    config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    lock_file: File,
    dispatcher: EventDispatcher,
    modules: ModuleManager<HostStore, SystemClock>,
    discovery: D,
}

impl Host<ManifestDiscovery> {
    /// Start a host that discovers packages from the configured vendor dir
    pub fn startup(config: &Config, handlers: HandlerRegistry) -> Result<Self, HostError> {
        let discovery = ManifestDiscovery::new(config.vendor_dir.clone())
            .with_module_type(config.module_type.as_str());
        Self::startup_with(config, handlers, discovery)
    }
}

impl<D: PackageDiscovery> Host<D> {
    /// Start a host with the given discovery collaborator.
    ///
    /// Takes the state directory lock, replays the module log, and restores
    /// the subscriptions of every registered module from current metadata.
    pub fn startup_with(
        config: &Config,
        handlers: HandlerRegistry,
        discovery: D,
    ) -> Result<Self, HostError> {
        std::fs::create_dir_all(&config.state_dir)?;

        // Lock FIRST so two hosts never share a log
        let mut lock_file = File::create(config.lock_path())?;
        lock_file
            .try_lock_exclusive()
            .map_err(HostError::LockFailed)?;
        writeln!(lock_file, "{}", std::process::id())?;

        let store = TracedModuleStore::new(WalModuleStore::open(config.wal_path())?);
        let subscriptions = SubscriptionRegistry::new();
        let modules = ModuleManager::new(store, subscriptions.clone(), SystemClock);
        let restored = modules.restore(&discovery)?;
        let dispatcher = EventDispatcher::new(subscriptions, handlers);

        tracing::info!(
            root = %config.root.display(),
            modules = modules.modules()?.len(),
            subscriptions = restored,
            version = version(),
            "host started"
        );

        Ok(Self {
            config: config.clone(),
            lock_file,
            dispatcher,
            modules,
            discovery,
        })
    }

    /// Register every discovered module package that is not yet
    /// registered, in package-name order. Returns the new modules.
    ///
    /// Stops at the first failure; modules registered before it stay.
    pub fn install_discovered(&self) -> Result<Vec<Module>, HostError> {
        let mut installed = Vec::new();
        for package in self.discovery.module_packages()? {
            if self.modules.module(&package.name)?.is_some() {
                tracing::trace!(library = %package.name, "already registered");
                continue;
            }
            installed.push(self.modules.register(&package.name, &package.descriptor)?);
        }

        if !installed.is_empty() {
            tracing::info!(count = installed.len(), "installed discovered modules");
        }
        Ok(installed)
    }

    /// Dispatch an event through the installed subscriptions
    pub fn dispatch(
        &self,
        event: &str,
        context: EventContext,
    ) -> Result<EventContext, DispatchError> {
        self.dispatcher.dispatch(event, context)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn modules(&self) -> &ModuleManager<HostStore, SystemClock> {
        &self.modules
    }

    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        self.dispatcher.subscriptions()
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        self.dispatcher.handlers()
    }

    pub fn discovery(&self) -> &D {
        &self.discovery
    }

    /// Release the lock and remove the lock file
    pub fn shutdown(self) {
        let lock_path = self.config.lock_path();
        drop(self.lock_file);
        if let Err(e) = std::fs::remove_file(&lock_path) {
            tracing::warn!(path = %lock_path.display(), error = %e, "failed to remove lock file");
        }
        tracing::info!("host shutdown complete");
    }
}

/// Version of the running host
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
