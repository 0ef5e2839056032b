// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discovery from package manifests on disk
//!
//! Packages live at `<vendor_dir>/<vendor>/<name>/package.json`:
//!
//! ```json
//! {
//!   "name": "vendor/name",
//!   "type": "tavern-module",
//!   "extra": { "subscriptions": [{ "pattern": "/^evt\\.start$/", "class": "OnStart" }] }
//! }
//! ```
//!
//! A manifest whose `name` is not its `<vendor>/<name>` location is ignored.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tavern_core::{DiscoveryError, ModuleDescriptor, Package, PackageDiscovery};
use thiserror::Error;

/// Manifest file name inside each package directory
pub const MANIFEST_FILE: &str = "package.json";

/// Package type that marks a package as a module
pub const DEFAULT_MODULE_TYPE: &str = "tavern-module";

/// Errors reading package manifests
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    name: String,
    #[serde(rename = "type", default = "default_kind")]
    kind: String,
    #[serde(default)]
    extra: serde_json::Value,
}

fn default_kind() -> String {
    "library".to_string()
}

/// Reads packages from a vendor directory
#[derive(Debug, Clone)]
pub struct ManifestDiscovery {
    vendor_dir: PathBuf,
    module_type: String,
}

impl ManifestDiscovery {
    pub fn new(vendor_dir: impl Into<PathBuf>) -> Self {
        Self {
            vendor_dir: vendor_dir.into(),
            module_type: DEFAULT_MODULE_TYPE.to_string(),
        }
    }

    /// Use a different package type to mark modules
    pub fn with_module_type(self, module_type: impl Into<String>) -> Self {
        Self {
            module_type: module_type.into(),
            ..self
        }
    }

    fn read_manifest(path: &Path) -> Result<Package, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawManifest =
            serde_json::from_str(&content).map_err(|source| ManifestError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Package {
            name: raw.name,
            kind: raw.kind,
            descriptor: ModuleDescriptor::from_extra(&raw.extra),
        })
    }

    fn scan(&self) -> Result<Vec<Package>, ManifestError> {
        let mut packages = Vec::new();
        for vendor in subdirs(&self.vendor_dir)? {
            for package_dir in subdirs(&vendor)? {
                let manifest = package_dir.join(MANIFEST_FILE);
                if !manifest.is_file() {
                    tracing::debug!(dir = %package_dir.display(), "no manifest, skipping");
                    continue;
                }
                let package = Self::read_manifest(&manifest)?;
                let location = format!("{}/{}", dir_name(&vendor), dir_name(&package_dir));
                if package.name != location {
                    tracing::warn!(
                        declared = %package.name,
                        location,
                        "manifest name does not match its directory, skipping"
                    );
                    continue;
                }
                packages.push(package);
            }
        }
        packages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(packages)
    }
}

impl PackageDiscovery for ManifestDiscovery {
    fn packages(&self) -> Result<Vec<Package>, DiscoveryError> {
        self.scan().map_err(DiscoveryError::backend)
    }

    fn module_type(&self) -> &str {
        &self.module_type
    }

    /// Reads the library's manifest directly instead of scanning
    fn package(&self, library: &str) -> Result<Package, DiscoveryError> {
        if !is_library_name(library) {
            tracing::warn!(library, "not a vendor/name library, refusing to look it up");
            return Err(DiscoveryError::LibraryDoesNotExist(library.to_string()));
        }
        let manifest = self.vendor_dir.join(library).join(MANIFEST_FILE);
        if !manifest.is_file() {
            return Err(DiscoveryError::LibraryDoesNotExist(library.to_string()));
        }

        let package = Self::read_manifest(&manifest).map_err(DiscoveryError::backend)?;
        if package.name != library {
            tracing::warn!(
                library,
                declared = %package.name,
                "manifest name does not match its directory"
            );
            return Err(DiscoveryError::LibraryDoesNotExist(library.to_string()));
        }
        Ok(package)
    }
}

/// A library is exactly `vendor/name` with plain path segments
fn is_library_name(library: &str) -> bool {
    let mut segments = library.split('/');
    let plain = |s: Option<&str>| {
        s.is_some_and(|s| !s.is_empty() && s != "." && s != ".." && !s.contains('\\'))
    };
    plain(segments.next()) && plain(segments.next()) && segments.next().is_none()
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Child directories in name order; a missing directory has none
fn subdirs(dir: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let io_err = |source| ManifestError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(e)),
    };

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
