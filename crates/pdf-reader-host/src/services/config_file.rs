// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration persisted as JSON.

use std::path::Path;

use pdf_reader_core::BridgeConfig;
use pdf_reader_core::error::Result;
use tracing::{info, warn};

/// Read a config file.
pub fn load(path: &Path) -> Result<BridgeConfig> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Read a config file, falling back to defaults if it is missing or
/// malformed.
pub fn load_or_default(path: &Path) -> BridgeConfig {
    match load(path) {
        Ok(config) => {
            info!(path = %path.display(), "loaded bridge config");
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config unavailable, using defaults");
            BridgeConfig::default()
        }
    }
}
