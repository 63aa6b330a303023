// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory content resolver for tests, benches, and hosts that hand over
// bytes they already hold.
//
// Every stream it hands out bumps `opened()`; every stream dropped bumps
// `released()`, so callers can assert that no handle leaks on any path.
// Every metadata query bumps `queried()`.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pdf_reader_core::error::{BridgeError, Result};
use pdf_reader_core::types::{NameLookup, ResourceIdentifier};

use crate::traits::{ContentResolver, PlatformBridge, ResourceStream};

/// How a registered stream misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StreamFault {
    /// Reads succeed to the end.
    None,
    /// `open_stream` itself returns an error.
    OpenError,
    /// Reads fail once this many bytes have been delivered.
    FailAfter(usize),
    /// `open_stream` panics.
    Panic,
}

#[derive(Debug, Clone)]
struct Entry {
    bytes: Option<Vec<u8>>,
    display_name: Option<String>,
    fault: StreamFault,
    panic_on_query: bool,
}

impl Entry {
    fn empty() -> Self {
        Self {
            bytes: None,
            display_name: None,
            fault: StreamFault::None,
            panic_on_query: false,
        }
    }
}

/// Content resolver backed by a map of identifier → bytes and names.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    entries: HashMap<String, Entry>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
    queried: Arc<AtomicUsize>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, uri: &str) -> &mut Entry {
        self.entries.entry(uri.to_owned()).or_insert_with(Entry::empty)
    }

    /// Serve `bytes` for `uri`.
    pub fn with_resource(mut self, uri: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.entry(uri).bytes = Some(bytes.into());
        self
    }

    /// Answer metadata queries for `uri` with `name`.
    pub fn with_display_name(mut self, uri: &str, name: &str) -> Self {
        self.entry(uri).display_name = Some(name.to_owned());
        self
    }

    /// Serve `bytes` for `uri`, failing the read after `fail_after` bytes.
    pub fn with_failing_stream(
        mut self,
        uri: &str,
        bytes: impl Into<Vec<u8>>,
        fail_after: usize,
    ) -> Self {
        let entry = self.entry(uri);
        entry.bytes = Some(bytes.into());
        entry.fault = StreamFault::FailAfter(fail_after);
        self
    }

    /// Make `open_stream` return an error for `uri`.
    pub fn with_open_error(mut self, uri: &str) -> Self {
        self.entry(uri).fault = StreamFault::OpenError;
        self
    }

    /// Make `open_stream` panic for `uri`.
    pub fn with_open_panic(mut self, uri: &str) -> Self {
        self.entry(uri).fault = StreamFault::Panic;
        self
    }

    /// Make `query_display_name` panic for `uri`.
    pub fn with_query_panic(mut self, uri: &str) -> Self {
        self.entry(uri).panic_on_query = true;
        self
    }

    /// Streams handed out so far.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Streams dropped so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Metadata queries answered so far.
    pub fn queried(&self) -> usize {
        self.queried.load(Ordering::SeqCst)
    }
}

impl ContentResolver for MemoryResolver {
    fn open_stream(&self, id: &ResourceIdentifier) -> Result<Option<ResourceStream<'_>>> {
        let Some(entry) = self.entries.get(id.as_str()) else {
            return Ok(None);
        };
        match entry.fault {
            StreamFault::OpenError => {
                return Err(BridgeError::Bridge(format!("permission denied for {id}")));
            }
            StreamFault::Panic => panic!("resolver crashed opening {id}"),
            StreamFault::None | StreamFault::FailAfter(_) => {}
        }
        let Some(bytes) = entry.bytes.clone() else {
            return Ok(None);
        };

        self.opened.fetch_add(1, Ordering::SeqCst);
        let fail_after = match entry.fault {
            StreamFault::FailAfter(n) => Some(n),
            _ => None,
        };
        Ok(Some(Box::new(MemoryStream {
            data: Cursor::new(bytes),
            fail_after,
            released: Arc::clone(&self.released),
        })))
    }

    fn query_display_name(&self, id: &ResourceIdentifier) -> NameLookup {
        self.queried.fetch_add(1, Ordering::SeqCst);
        match self.entries.get(id.as_str()) {
            Some(entry) if entry.panic_on_query => panic!("metadata provider crashed for {id}"),
            Some(entry) => NameLookup::from(entry.display_name.clone()),
            None => NameLookup::NotFound,
        }
    }
}

impl PlatformBridge for MemoryResolver {
    fn platform_name(&self) -> &str {
        "Memory"
    }
}

struct MemoryStream {
    data: Cursor<Vec<u8>>,
    fail_after: Option<usize>,
    released: Arc<AtomicUsize>,
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(limit) = self.fail_after else {
            return self.data.read(buf);
        };
        let pos = usize::try_from(self.data.position()).unwrap_or(usize::MAX);
        if pos >= limit {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "provider closed the stream",
            ));
        }
        let allowed = (limit - pos).min(buf.len());
        self.data.read(&mut buf[..allowed])
    }
}

impl Drop for MemoryStream {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
