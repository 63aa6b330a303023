// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire-level error codes and the error taxonomy.
//
// The managed runtime only sees the string codes below. The class drives how
// the host logs a failure; nothing in this crate retries.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Error code reported across the method channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A required argument was missing or not a string.
    #[serde(rename = "INVALID_ARGUMENTS")]
    InvalidArguments,
    /// `copyContentUri` aborted abnormally.
    #[serde(rename = "COPY_ERROR")]
    CopyError,
    /// `getFileNameFromContentUri` aborted abnormally.
    #[serde(rename = "GET_FILE_NAME_ERROR")]
    GetFileNameError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArguments => "INVALID_ARGUMENTS",
            Self::CopyError => "COPY_ERROR",
            Self::GetFileNameError => "GET_FILE_NAME_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller error: bad arguments or an unusable destination. Never retried.
    Caller,
    /// The identifier could not be opened or queried (revoked, deleted,
    /// unsupported scheme). An expected outcome, not an exceptional one.
    Resolution,
    /// Directory creation, write, or release failed partway through.
    Io,
    /// The host capability itself is missing or broken.
    Platform,
}

/// Classify an error into the taxonomy used for logging.
pub fn classify_error(err: &BridgeError) -> ErrorClass {
    match err {
        BridgeError::InvalidDestination(_) => ErrorClass::Caller,
        BridgeError::StreamUnavailable(_) => ErrorClass::Resolution,
        BridgeError::Io(_) | BridgeError::Serialization(_) => ErrorClass::Io,
        BridgeError::Bridge(_) => ErrorClass::Platform,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_serialize_to_wire_strings() {
        let json = serde_json::to_string(&ErrorCode::CopyError).unwrap();
        assert_eq!(json, "\"COPY_ERROR\"");
        let back: ErrorCode = serde_json::from_str("\"GET_FILE_NAME_ERROR\"").unwrap();
        assert_eq!(back, ErrorCode::GetFileNameError);
        assert_eq!(ErrorCode::InvalidArguments.to_string(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn missing_stream_is_resolution() {
        let err = BridgeError::StreamUnavailable("content://gone/1".into());
        assert_eq!(classify_error(&err), ErrorClass::Resolution);
    }

    #[test]
    fn write_failure_is_io() {
        let err = BridgeError::Io(std::io::Error::other("disk full"));
        assert_eq!(classify_error(&err), ErrorClass::Io);
    }

    #[test]
    fn jni_failure_is_platform() {
        assert_eq!(
            classify_error(&BridgeError::Bridge("attach failed".into())),
            ErrorClass::Platform
        );
    }

    #[test]
    fn bad_destination_is_caller() {
        let err = BridgeError::InvalidDestination("/".into());
        assert_eq!(classify_error(&err), ErrorClass::Caller);
    }
}
