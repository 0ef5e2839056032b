// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: package manifests on disk and traced storage

pub mod discovery;
pub mod traced;

pub use discovery::{ManifestDiscovery, ManifestError, DEFAULT_MODULE_TYPE, MANIFEST_FILE};
pub use traced::TracedModuleStore;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use discovery::{DiscoveryCall, FakeDiscovery};
