// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the file handler.

use thiserror::Error;

/// Top-level error type for all file handler operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Resolution errors --
    #[error("no readable stream for {0}")]
    StreamUnavailable(String),

    // -- Caller errors --
    #[error("destination has no file name: {0}")]
    InvalidDestination(String),

    // -- I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;
