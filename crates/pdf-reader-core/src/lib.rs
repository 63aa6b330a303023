// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF Reader core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod error_codes;
pub mod types;

pub use config::{BridgeConfig, CopyMode};
pub use error::BridgeError;
pub use error_codes::{ErrorClass, ErrorCode};
pub use types::*;
