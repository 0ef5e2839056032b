// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake package discovery for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tavern_core::{DiscoveryError, ModuleDescriptor, Package, PackageDiscovery};

use super::DEFAULT_MODULE_TYPE;

/// Recorded discovery call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryCall {
    Packages,
    Package { library: String },
}

/// In-memory package set; packages come back in name order
#[derive(Clone, Default)]
pub struct FakeDiscovery {
    packages: Arc<Mutex<BTreeMap<String, Package>>>,
    calls: Arc<Mutex<Vec<DiscoveryCall>>>,
    failure: Arc<Mutex<Option<String>>>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct FakeFailure(String);

impl FakeDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a module package
    pub fn add_module(&self, name: &str, descriptor: ModuleDescriptor) {
        self.add_package(Package {
            name: name.to_string(),
            kind: DEFAULT_MODULE_TYPE.to_string(),
            descriptor,
        });
    }

    pub fn add_package(&self, package: Package) {
        self.packages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(package.name.clone(), package);
    }

    pub fn remove_package(&self, name: &str) {
        self.packages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name);
    }

    /// Make every following call fail with `message`
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<DiscoveryCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: DiscoveryCall) -> Result<(), DiscoveryError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        match self.failure.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            Some(message) => Err(DiscoveryError::backend(FakeFailure(message.clone()))),
            None => Ok(()),
        }
    }
}

impl PackageDiscovery for FakeDiscovery {
    fn packages(&self) -> Result<Vec<Package>, DiscoveryError> {
        self.record(DiscoveryCall::Packages)?;
        Ok(self
            .packages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect())
    }

    fn module_type(&self) -> &str {
        DEFAULT_MODULE_TYPE
    }

    fn package(&self, library: &str) -> Result<Package, DiscoveryError> {
        self.record(DiscoveryCall::Package {
            library: library.to_string(),
        })?;
        self.packages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(library)
            .cloned()
            .ok_or_else(|| DiscoveryError::LibraryDoesNotExist(library.to_string()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
