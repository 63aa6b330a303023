// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resource copier. Streams the bytes behind a resource identifier into a
// local file.
//
// The source stream and the destination handle are owned values, so both
// are released when they go out of scope on every exit path, including `?`
// early returns.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use pdf_reader_core::error::{BridgeError, Result};
use pdf_reader_core::error_codes::{ErrorClass, classify_error};
use pdf_reader_core::types::{DestinationPath, ResourceIdentifier};
use pdf_reader_core::{BridgeConfig, CopyMode};
use tracing::{debug, info, instrument, warn};

use crate::traits::ContentResolver;

/// Result of a successful copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub bytes_copied: u64,
    pub destination: PathBuf,
}

/// Copy the resource into `destination`, reporting what happened.
///
/// Order of operations: open the source stream, create the destination's
/// parent directories, then write. No directory is created when the stream
/// cannot be opened.
#[instrument(skip_all, fields(uri = %id, dest = %destination, mode = ?config.copy_mode))]
pub fn try_copy<R: ContentResolver + ?Sized>(
    resolver: &R,
    config: &BridgeConfig,
    id: &ResourceIdentifier,
    destination: &DestinationPath,
) -> Result<CopyReport> {
    let Some(mut source) = resolver.open_stream(id)? else {
        return Err(BridgeError::StreamUnavailable(id.to_string()));
    };

    if destination.as_path().file_name().is_none() {
        return Err(BridgeError::InvalidDestination(destination.to_string()));
    }

    if let Some(parent) = destination.parent_dir() {
        fs::create_dir_all(parent)?;
    }

    let bytes_copied = match config.copy_mode {
        CopyMode::InPlace => write_in_place(&mut source, destination.as_path(), config)?,
        CopyMode::Atomic => write_atomic(&mut source, destination, config)?,
    };

    debug!(bytes = bytes_copied, "copy complete");
    Ok(CopyReport {
        bytes_copied,
        destination: destination.as_path().to_path_buf(),
    })
}

/// Copy the resource into `destination`.
///
/// Returns `true` iff every byte reached the destination. Failures are
/// logged, never raised.
pub fn copy<R: ContentResolver + ?Sized>(
    resolver: &R,
    config: &BridgeConfig,
    id: &ResourceIdentifier,
    destination: &DestinationPath,
) -> bool {
    match try_copy(resolver, config, id, destination) {
        Ok(report) => {
            info!(
                uri = %id,
                dest = %destination,
                bytes = report.bytes_copied,
                "copied resource to destination"
            );
            true
        }
        Err(e) => {
            match classify_error(&e) {
                ErrorClass::Resolution => {
                    info!(uri = %id, error = %e, "resource could not be opened");
                }
                class => {
                    warn!(uri = %id, dest = %destination, ?class, error = %e, "copy failed");
                }
            }
            false
        }
    }
}

fn write_in_place(source: &mut dyn Read, dest: &Path, config: &BridgeConfig) -> Result<u64> {
    let mut file = File::create(dest)?;
    let bytes = pump(source, &mut file, config.buffer_size())?;
    if config.sync_on_close {
        file.sync_all()?;
    }
    Ok(bytes)
}

fn write_atomic(
    source: &mut dyn Read,
    dest: &DestinationPath,
    config: &BridgeConfig,
) -> Result<u64> {
    let dir = dest.parent_dir().unwrap_or(Path::new("."));
    // Removed on drop unless persisted.
    let mut partial = tempfile::Builder::new()
        .prefix(".pdf-reader-")
        .suffix(".part")
        .tempfile_in(dir)?;

    let bytes = pump(source, partial.as_file_mut(), config.buffer_size())?;
    if config.sync_on_close {
        partial.as_file().sync_all()?;
    }
    partial
        .persist(dest.as_path())
        .map_err(|e| BridgeError::Io(e.error))?;
    Ok(bytes)
}

/// Move every byte from `source` to `sink` in order.
fn pump(source: &mut dyn Read, sink: &mut impl Write, buffer_size: usize) -> io::Result<u64> {
    let mut buf = vec![0u8; buffer_size];
    let mut total: u64 = 0;
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        sink.write_all(&buf[..n])?;
        total += n as u64;
    }
    sink.flush()?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryResolver;

    const URI: &str = "content://com.android.providers.downloads.documents/document/42";

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[test]
    fn copies_into_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("cache/pdfs/nested/report.pdf"));
        let bytes = sample(100_000);
        let resolver = MemoryResolver::new().with_resource(URI, bytes.clone());

        assert!(copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest));
        assert_eq!(fs::read(dest.as_path()).unwrap(), bytes);
        assert_eq!(resolver.opened(), 1);
        assert_eq!(resolver.released(), 1);
    }

    #[test]
    fn report_counts_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("a.pdf"));
        let resolver = MemoryResolver::new().with_resource(URI, sample(12_345));

        let report = try_copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest).unwrap();
        assert_eq!(report.bytes_copied, 12_345);
        assert_eq!(report.destination, dest.as_path());
    }

    #[test]
    fn empty_resource_creates_empty_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("empty.pdf"));
        let resolver = MemoryResolver::new().with_resource(URI, Vec::new());

        assert!(copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest));
        assert_eq!(fs::metadata(dest.as_path()).unwrap().len(), 0);
    }

    #[test]
    fn overwrites_longer_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("doc.pdf");
        fs::write(&path, vec![0xFFu8; 4096]).unwrap();
        let resolver = MemoryResolver::new().with_resource(URI, b"%PDF-1.7 short".to_vec());

        let dest = DestinationPath::new(&path);
        assert!(copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7 short");
    }

    #[test]
    fn repeated_copy_yields_same_content() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("x/y.pdf"));
        let bytes = sample(9000);
        let resolver = MemoryResolver::new().with_resource(URI, bytes.clone());
        let config = BridgeConfig::default();

        assert!(copy(&resolver, &config, &URI.into(), &dest));
        assert!(copy(&resolver, &config, &URI.into(), &dest));
        assert_eq!(fs::read(dest.as_path()).unwrap(), bytes);
    }

    #[test]
    fn unopenable_resource_returns_false_without_side_effects() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("never/created.pdf"));
        let resolver = MemoryResolver::new();

        assert!(!copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest));
        assert!(!tmp.path().join("never").exists());

        let err = try_copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest).unwrap_err();
        assert!(matches!(err, BridgeError::StreamUnavailable(_)));
    }

    #[test]
    fn open_error_collapses_to_false() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("a.pdf"));
        let resolver = MemoryResolver::new().with_open_error(URI);

        assert!(!copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest));
        assert!(!dest.as_path().exists());
    }

    #[test]
    fn mid_stream_failure_releases_stream_and_leaves_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("partial.pdf"));
        let resolver = MemoryResolver::new().with_failing_stream(URI, sample(10_000), 3000);
        let config = BridgeConfig {
            copy_buffer_size: 1000,
            ..Default::default()
        };

        assert!(!copy(&resolver, &config, &URI.into(), &dest));
        assert_eq!(resolver.released(), resolver.opened());
        // In-place mode keeps whatever was flushed before the failure.
        assert_eq!(fs::read(dest.as_path()).unwrap(), sample(10_000)[..3000]);
    }

    #[test]
    fn atomic_failure_keeps_previous_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("keep.pdf");
        fs::write(&path, b"previous").unwrap();
        let resolver = MemoryResolver::new().with_failing_stream(URI, sample(10_000), 5000);
        let config = BridgeConfig {
            copy_mode: CopyMode::Atomic,
            ..Default::default()
        };

        assert!(!copy(&resolver, &config, &URI.into(), &DestinationPath::new(&path)));
        assert_eq!(fs::read(&path).unwrap(), b"previous");
        let leftovers: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "temporary file must be cleaned up");
        assert_eq!(resolver.released(), 1);
    }

    #[test]
    fn atomic_success_replaces_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = DestinationPath::new(tmp.path().join("new/dir/out.pdf"));
        let bytes = sample(40_000);
        let resolver = MemoryResolver::new().with_resource(URI, bytes.clone());
        let config = BridgeConfig {
            copy_mode: CopyMode::Atomic,
            ..Default::default()
        };

        assert!(copy(&resolver, &config, &URI.into(), &dest));
        assert_eq!(fs::read(dest.as_path()).unwrap(), bytes);
    }

    #[test]
    fn directory_destination_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let resolver = MemoryResolver::new().with_resource(URI, sample(16));
        let dest = DestinationPath::new(tmp.path());

        assert!(!copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest));
        assert_eq!(resolver.released(), 1);
    }

    #[test]
    fn parent_is_a_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let resolver = MemoryResolver::new().with_resource(URI, sample(16));
        let dest = DestinationPath::new(blocker.join("out.pdf"));

        let err = try_copy(&resolver, &BridgeConfig::default(), &URI.into(), &dest).unwrap_err();
        assert_eq!(classify_error(&err), ErrorClass::Io);
        assert_eq!(resolver.released(), 1);
    }
}
