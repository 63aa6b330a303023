// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the resource copier and name resolver in the
// pdf-reader-bridge crate.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use pdf_reader_bridge::{ContentBridge, MemoryResolver};
use pdf_reader_core::types::{DestinationPath, ResourceIdentifier};
use pdf_reader_core::{BridgeConfig, CopyMode};

const URI: &str = "content://com.android.providers.downloads.documents/document/1001";

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark copying documents of various sizes in both write modes.
///
/// Sizes: 64 KiB, 1 MiB, 8 MiB -- from a one-page scan to a long manual.
fn bench_copy(c: &mut Criterion) {
    let sizes: &[(&str, usize)] = &[
        ("64 KiB", 64 * 1024),
        ("1 MiB", 1024 * 1024),
        ("8 MiB", 8 * 1024 * 1024),
    ];
    let dir = tempfile::tempdir().expect("create bench dir");
    let dest = DestinationPath::new(dir.path().join("bench/out.pdf"));
    let id = ResourceIdentifier::new(URI);

    let mut group = c.benchmark_group("copy");
    for mode in [CopyMode::InPlace, CopyMode::Atomic] {
        for &(label, size) in sizes {
            let resolver = MemoryResolver::new().with_resource(URI, vec![0x25u8; size]);
            let config = BridgeConfig {
                copy_mode: mode,
                // Measure the copy loop, not the disk flush.
                sync_on_close: false,
                ..Default::default()
            };
            let bridge = ContentBridge::new(resolver, config);

            group.bench_function(BenchmarkId::new(format!("{mode:?}"), label), |b| {
                b.iter(|| {
                    assert!(bridge.copy(black_box(&id), black_box(&dest)));
                });
            });
        }
    }
    group.finish();
}

/// Benchmark name resolution through the path-tail fallback.
fn bench_resolve_name(c: &mut Criterion) {
    let bridge = ContentBridge::new(MemoryResolver::new(), BridgeConfig::default());
    let id = ResourceIdentifier::new(
        "content://com.android.externalstorage.documents/document/primary%3ADownload%2Freport.pdf",
    );

    c.bench_function("resolve_name (path fallback)", |b| {
        b.iter(|| {
            black_box(bridge.resolve_name(black_box(&id)));
        });
    });
}

criterion_group!(benches, bench_copy, bench_resolve_name);
criterion_main!(benches);
