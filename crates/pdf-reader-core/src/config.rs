// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File handler configuration.

use serde::{Deserialize, Serialize};

/// Method channel the managed runtime talks to.
pub const DEFAULT_CHANNEL: &str = "pdf_reader/file_handler";

/// Chunk size used when streaming resource bytes to disk.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 8192;

/// How the copier writes the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyMode {
    /// Truncate and write the destination directly. A failed copy may leave a
    /// partially written file behind.
    #[default]
    InPlace,
    /// Write a sibling temporary file and rename it over the destination once
    /// every byte is on disk. A failed copy leaves the destination untouched.
    Atomic,
}

/// Settings for the content bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Method channel name.
    pub channel: String,
    /// URI schemes whose identifiers can be queried for metadata.
    pub metadata_schemes: Vec<String>,
    /// Read buffer size for the copy loop.
    pub copy_buffer_size: usize,
    /// Destination write strategy.
    pub copy_mode: CopyMode,
    /// fsync the destination before reporting success.
    pub sync_on_close: bool,
}

impl BridgeConfig {
    /// Whether identifiers with this scheme support a metadata query.
    pub fn is_metadata_scheme(&self, scheme: &str) -> bool {
        self.metadata_schemes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(scheme))
    }

    /// Buffer size, never zero.
    pub fn buffer_size(&self) -> usize {
        self.copy_buffer_size.max(1)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.into(),
            metadata_schemes: vec!["content".into()],
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            copy_mode: CopyMode::InPlace,
            sync_on_close: true,
        }
    }
}
