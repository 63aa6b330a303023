// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! PDF Reader content URI bridge.
//!
//! Copies the bytes behind a host-issued resource identifier into a local
//! file and resolves a display name for it. The host capabilities sit behind
//! the [`traits::ContentResolver`] trait; [`dispatch::FileHandler`] exposes
//! both operations as method-channel calls.

pub mod content;
pub mod dispatch;
pub mod memory;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod desktop;

pub use content::{ContentBridge, CopyReport};
pub use dispatch::{FileHandler, MethodCall, MethodResponse};
pub use memory::MemoryResolver;
pub use traits::{ContentResolver, PlatformBridge, ResourceStream};

/// Retrieves the bridge implementation for the target operating system.
///
/// RETURNS: A boxed trait object (`dyn PlatformBridge`) that abstracts away
/// the underlying native SDK details.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: Uses `jni-rs` to call into the Activity's ContentResolver.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: file:// identifiers only, no metadata provider.
        Box::new(desktop::DesktopBridge)
    }
}
