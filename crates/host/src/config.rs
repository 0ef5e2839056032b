// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host configuration loaded from `tavern.toml`

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILE: &str = "tavern.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk shape of `tavern.toml`; every key is optional
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    state_dir: PathBuf,
    vendor_dir: PathBuf,
    log_filter: String,
    module_type: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".tavern"),
            vendor_dir: PathBuf::from("vendor"),
            log_filter: "info".to_string(),
            module_type: tavern_adapters::DEFAULT_MODULE_TYPE.to_string(),
        }
    }
}

/// Resolved host configuration with absolute-or-rooted paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the configuration is rooted at
    pub root: PathBuf,
    /// Directory holding the WAL, lock, and log
    pub state_dir: PathBuf,
    /// Directory scanned for package manifests
    pub vendor_dir: PathBuf,
    /// Default tracing filter; `RUST_LOG` overrides it
    pub log_filter: String,
    /// Package type that marks a package as a module
    pub module_type: String,
}

impl Config {
    /// Load `tavern.toml` from `root`, or defaults if it is absent
    pub fn for_root(root: &Path) -> Result<Self, ConfigError> {
        Self::load(&root.join(CONFIG_FILE))
    }

    /// Load a configuration file. Relative paths inside it resolve against
    /// the file's directory. A missing file yields defaults rooted there.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let file = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                ConfigFile::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Ok(Self::resolve(root, file))
    }

    /// Defaults rooted at `root`
    pub fn defaults(root: &Path) -> Self {
        Self::resolve(root.to_path_buf(), ConfigFile::default())
    }

    fn resolve(root: PathBuf, file: ConfigFile) -> Self {
        Self {
            state_dir: root.join(file.state_dir),
            vendor_dir: root.join(file.vendor_dir),
            log_filter: file.log_filter,
            module_type: file.module_type,
            root,
        }
    }

    pub fn wal_path(&self) -> PathBuf {
        self.state_dir.join("modules.wal")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.state_dir.join("tavernd.lock")
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join("tavernd.log")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
