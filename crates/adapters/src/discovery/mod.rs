// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Package discovery adapters

mod manifest;

pub use manifest::{ManifestDiscovery, ManifestError, DEFAULT_MODULE_TYPE, MANIFEST_FILE};

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DiscoveryCall, FakeDiscovery};
