// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the host capabilities the file
// handler consumes.

use std::io::Read;

use pdf_reader_core::error::Result;
use pdf_reader_core::types::{NameLookup, ResourceIdentifier};

/// Readable byte stream for a resource. Dropping it releases the host
/// handle.
pub type ResourceStream<'a> = Box<dyn Read + 'a>;

/// Host capability for turning resource identifiers into bytes and names.
pub trait ContentResolver {
    /// Open a readable stream for `id`.
    ///
    /// Returns `Ok(None)` when the host has no stream for the identifier
    /// (revoked, deleted, unsupported scheme). `Err` is reserved for the
    /// capability itself failing.
    fn open_stream(&self, id: &ResourceIdentifier) -> Result<Option<ResourceStream<'_>>>;

    /// Look up the host's display-name record for `id`.
    ///
    /// Infallible by contract: every failure is `NameLookup::NotFound`.
    fn query_display_name(&self, id: &ResourceIdentifier) -> NameLookup;
}

/// Content resolver plus platform identification.
pub trait PlatformBridge: ContentResolver {
    /// Human-readable platform name (e.g. "Android", "Desktop").
    fn platform_name(&self) -> &str;
}

impl<T: ContentResolver + ?Sized> ContentResolver for Box<T> {
    fn open_stream(&self, id: &ResourceIdentifier) -> Result<Option<ResourceStream<'_>>> {
        (**self).open_stream(id)
    }

    fn query_display_name(&self, id: &ResourceIdentifier) -> NameLookup {
        (**self).query_display_name(id)
    }
}

impl<T: ContentResolver + ?Sized> ContentResolver for &T {
    fn open_stream(&self, id: &ResourceIdentifier) -> Result<Option<ResourceStream<'_>>> {
        (**self).open_stream(id)
    }

    fn query_display_name(&self, id: &ResourceIdentifier) -> NameLookup {
        (**self).query_display_name(id)
    }
}
