// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Name resolver: host metadata first, identifier path tail second.

use pdf_reader_core::BridgeConfig;
use pdf_reader_core::types::{DisplayName, NameLookup, ResourceIdentifier};
use tracing::{debug, instrument};

use crate::traits::ContentResolver;

/// Resolve a display name for `id`.
///
/// Only identifiers whose scheme is listed in `config.metadata_schemes` are
/// sent to the host for a metadata query. Never fails.
#[instrument(skip_all, fields(uri = %id))]
pub fn resolve_name<R: ContentResolver + ?Sized>(
    resolver: &R,
    config: &BridgeConfig,
    id: &ResourceIdentifier,
) -> Option<DisplayName> {
    let lookup = match id.scheme() {
        Some(scheme) if config.is_metadata_scheme(scheme) => resolver.query_display_name(id),
        _ => NameLookup::NotFound,
    };
    let name = choose_name(lookup, id);
    debug!(name = ?name.as_ref().map(DisplayName::as_str), "resolved display name");
    name
}

/// Pick the metadata name when there is one, otherwise derive it from the
/// identifier's path.
pub fn choose_name(lookup: NameLookup, id: &ResourceIdentifier) -> Option<DisplayName> {
    match lookup {
        NameLookup::Found(name) => Some(name),
        NameLookup::NotFound => id.path_tail().and_then(DisplayName::new),
    }
}
