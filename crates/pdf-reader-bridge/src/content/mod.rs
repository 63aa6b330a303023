// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content resolution: copy a resource to disk and name it.

pub mod copier;
pub mod names;

use pdf_reader_core::BridgeConfig;
use pdf_reader_core::error::Result;
use pdf_reader_core::types::{DestinationPath, DisplayName, ResourceIdentifier};

pub use copier::CopyReport;

use crate::traits::ContentResolver;

/// Both content operations over one injected resolver.
///
/// Stateless between calls; the resolver and config are read-only.
pub struct ContentBridge<R> {
    resolver: R,
    config: BridgeConfig,
}

impl<R: ContentResolver> ContentBridge<R> {
    pub fn new(resolver: R, config: BridgeConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// See [`copier::copy`].
    pub fn copy(&self, id: &ResourceIdentifier, destination: &DestinationPath) -> bool {
        copier::copy(&self.resolver, &self.config, id, destination)
    }

    /// See [`copier::try_copy`].
    pub fn try_copy(
        &self,
        id: &ResourceIdentifier,
        destination: &DestinationPath,
    ) -> Result<CopyReport> {
        copier::try_copy(&self.resolver, &self.config, id, destination)
    }

    /// See [`names::resolve_name`].
    pub fn resolve_name(&self, id: &ResourceIdentifier) -> Option<DisplayName> {
        names::resolve_name(&self.resolver, &self.config, id)
    }
}
