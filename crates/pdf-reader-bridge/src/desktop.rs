// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge for non-mobile builds.
//
// There is no document provider on desktop, so only `file://` identifiers
// resolve to streams and metadata queries always come back empty.

use std::fs::File;
use std::io;

use pdf_reader_core::error::Result;
use pdf_reader_core::types::{NameLookup, ResourceIdentifier};
use tracing::debug;

use crate::traits::{ContentResolver, PlatformBridge, ResourceStream};

/// Local-filesystem bridge returned on non-mobile platforms.
pub struct DesktopBridge;

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl ContentResolver for DesktopBridge {
    fn open_stream(&self, id: &ResourceIdentifier) -> Result<Option<ResourceStream<'_>>> {
        if !id.has_scheme("file") {
            debug!(uri = %id, "desktop bridge only opens file:// identifiers");
            return Ok(None);
        }
        let Some(path) = id.path().filter(|p| !p.is_empty()) else {
            return Ok(None);
        };
        match File::open(&path) {
            Ok(file) => Ok(Some(Box::new(file))),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                ) =>
            {
                debug!(uri = %id, error = %e, "file not readable");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn query_display_name(&self, id: &ResourceIdentifier) -> NameLookup {
        debug!(uri = %id, "no metadata provider on desktop");
        NameLookup::NotFound
    }
}
