// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package discovery collaborator

use crate::module::ModuleDescriptor;
use thiserror::Error;

/// Errors surfaced while discovering packages
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("library does not exist: {0}")]
    LibraryDoesNotExist(String),
    #[error("package discovery error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DiscoveryError {
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DiscoveryError::Backend(Box::new(err))
    }
}

/// An installed package and the subscriptions it declares
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Library name in "vendor/name" form
    pub name: String,
    /// Package type; modules carry the configured module type
    pub kind: String,
    pub descriptor: ModuleDescriptor,
}

/// Source of installed packages and their metadata
pub trait PackageDiscovery: Send + Sync {
    /// Every installed package, sorted by name
    fn packages(&self) -> Result<Vec<Package>, DiscoveryError>;

    /// The type string that marks a package as a module
    fn module_type(&self) -> &str;

    /// Installed packages that are modules
    fn module_packages(&self) -> Result<Vec<Package>, DiscoveryError> {
        let kind = self.module_type();
        Ok(self
            .packages()?
            .into_iter()
            .filter(|p| p.kind == kind)
            .collect())
    }

    /// Look up one package by library name
    fn package(&self, library: &str) -> Result<Package, DiscoveryError> {
        self.packages()?
            .into_iter()
            .find(|p| p.name == library)
            .ok_or_else(|| DiscoveryError::LibraryDoesNotExist(library.to_string()))
    }
}
