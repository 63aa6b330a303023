// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-channel dispatcher for the file handler.
//
// Maps named requests from the managed runtime onto the content operations
// and marshals their results back. Argument errors are reported before any
// I/O. A panic inside a host capability is caught here so that it surfaces as
// an error code instead of unwinding into the host.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pdf_reader_core::BridgeConfig;
use pdf_reader_core::error_codes::ErrorCode;
use pdf_reader_core::types::{DestinationPath, ResourceIdentifier};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::content::ContentBridge;
use crate::traits::ContentResolver;

pub const METHOD_COPY_CONTENT_URI: &str = "copyContentUri";
pub const METHOD_GET_FILE_NAME: &str = "getFileNameFromContentUri";

pub const ARG_CONTENT_URI: &str = "contentUri";
pub const ARG_DESTINATION_PATH: &str = "destinationPath";

/// A named request from the managed runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_argument(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.to_owned(), value.into());
        self
    }

    /// A non-empty string argument. Anything else counts as missing.
    pub fn string_argument(&self, key: &str) -> Option<&str> {
        self.arguments
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Reply sent back across the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success {
        result: Value,
    },
    Error {
        code: ErrorCode,
        message: String,
        #[serde(default)]
        details: Value,
    },
    NotImplemented {
        method: String,
    },
}

impl MethodResponse {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Error {
            code,
            message: message.into(),
            details: Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Handles calls arriving on the file handler channel.
pub struct FileHandler<R> {
    bridge: ContentBridge<R>,
}

impl<R: ContentResolver> FileHandler<R> {
    pub fn new(resolver: R, config: BridgeConfig) -> Self {
        Self {
            bridge: ContentBridge::new(resolver, config),
        }
    }

    /// Channel this handler should be registered on.
    pub fn channel(&self) -> &str {
        &self.bridge.config().channel
    }

    /// Dispatch a single call. Always returns a response.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        debug!(method = %call.method, "handling method call");
        match call.method.as_str() {
            METHOD_COPY_CONTENT_URI => self.handle_copy(call),
            METHOD_GET_FILE_NAME => self.handle_get_file_name(call),
            other => {
                warn!(method = other, "method not implemented");
                MethodResponse::NotImplemented {
                    method: other.to_owned(),
                }
            }
        }
    }

    fn handle_copy(&self, call: &MethodCall) -> MethodResponse {
        let (Some(uri), Some(dest)) = (
            call.string_argument(ARG_CONTENT_URI),
            call.string_argument(ARG_DESTINATION_PATH),
        ) else {
            return MethodResponse::error(
                ErrorCode::InvalidArguments,
                "Missing contentUri or destinationPath",
            );
        };

        let id = ResourceIdentifier::new(uri);
        let destination = DestinationPath::new(dest);
        match panic::catch_unwind(AssertUnwindSafe(|| self.bridge.copy(&id, &destination))) {
            Ok(copied) => MethodResponse::Success {
                result: Value::Bool(copied),
            },
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                error!(uri = %id, error = %detail, "copy aborted");
                MethodResponse::error(
                    ErrorCode::CopyError,
                    format!("Failed to copy file: {detail}"),
                )
            }
        }
    }

    fn handle_get_file_name(&self, call: &MethodCall) -> MethodResponse {
        let Some(uri) = call.string_argument(ARG_CONTENT_URI) else {
            return MethodResponse::error(ErrorCode::InvalidArguments, "Missing contentUri");
        };

        let id = ResourceIdentifier::new(uri);
        match panic::catch_unwind(AssertUnwindSafe(|| self.bridge.resolve_name(&id))) {
            Ok(name) => MethodResponse::Success {
                result: name.map_or(Value::Null, |n| Value::String(n.into_string())),
            },
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                error!(uri = %id, error = %detail, "name lookup aborted");
                MethodResponse::error(
                    ErrorCode::GetFileNameError,
                    format!("Failed to get file name: {detail}"),
                )
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown failure".to_owned()
    }
}
