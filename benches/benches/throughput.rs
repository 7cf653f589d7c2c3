//! Muon Comprehensive Criterion Benchmark
//!
//! Statistically rigorous performance measurements across input sizes,
//! compared against the usual suspects.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::prelude::*;
use std::hint::black_box;

const KB: usize = 1024;
const MB: usize = 1024 * 1024;

// =============================================================================
// BENCHMARK 1: LATENCY
// =============================================================================

/// Hot path latency for small inputs (hash map keys, IDs).
fn bench_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("1-Latency");

    let sizes = [
        (4, "4B"),
        (16, "16B"),
        (48, "48B"),
        (64, "64B"),
        (256, "256B"),
        (KB, "1KB"),
    ];

    for (size, name) in sizes {
        let mut input = vec![0u8; size];
        rand::rng().fill(&mut input[..]);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &input,
            |b, data| b.iter(|| muon::hash(black_box(data))),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 2: BULK THROUGHPUT
// =============================================================================

/// Throughput for buffer-sized inputs (file chunks, packets, blobs).
fn bench_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("2-Bulk");

    let sizes = [
        (4 * KB, "4KB"),
        (64 * KB, "64KB"),
        (MB, "1MB"),
        (16 * MB, "16MB"),
    ];

    for (size, name) in sizes {
        let mut input = vec![0u8; size];
        rand::rng().fill(&mut input[..]);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::from_parameter(name),
            &input,
            |b, data| b.iter(|| muon::hash(black_box(data))),
        );
    }
    group.finish();
}

// =============================================================================
// BENCHMARK 3: COMPETITION
// =============================================================================

/// Muon vs established hashes at 1 MB.
fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("3-Comparison-1MB");
    let mut input = vec![0u8; MB];
    rand::rng().fill(&mut input[..]);
    group.throughput(Throughput::Bytes(MB as u64));

    group.bench_function("muon", |b| b.iter(|| muon::hash(black_box(&input))));
    group.bench_function("gxhash64", |b| {
        b.iter(|| gxhash::gxhash64(black_box(&input), 0))
    });
    group.bench_function("xxh3", |b| {
        b.iter(|| xxhash_rust::xxh3::xxh3_64(black_box(&input)))
    });
    group.bench_function("blake3", |b| b.iter(|| blake3::hash(black_box(&input))));
    group.bench_function("sha256", |b| {
        use sha2::{Digest, Sha256};
        b.iter(|| Sha256::digest(black_box(&input)))
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 4: SIBLING OPERATIONS
// =============================================================================

/// Byte-sum and PRNG throughput at 1 MB.
fn bench_siblings(c: &mut Criterion) {
    let mut group = c.benchmark_group("4-Siblings-1MB");
    let mut input = vec![0u8; MB];
    rand::rng().fill(&mut input[..]);
    group.throughput(Throughput::Bytes(MB as u64));

    group.bench_function("bytesum", |b| b.iter(|| muon::bytesum(black_box(&input))));

    let mut out = vec![0u8; MB];
    group.bench_function("generate", |b| {
        b.iter(|| muon::generate(black_box(&mut out), 0xC0FFEE))
    });
    group.finish();
}

// =============================================================================
// BENCHMARK 5: STREAMING
// =============================================================================

/// Streaming vs one-shot at 1 MB, fed in 64 KB updates.
fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("5-Streaming-1MB");
    let mut input = vec![0u8; MB];
    rand::rng().fill(&mut input[..]);
    group.throughput(Throughput::Bytes(MB as u64));

    group.bench_function("oneshot", |b| b.iter(|| muon::hash(black_box(&input))));
    group.bench_function("updates-64KB", |b| {
        b.iter(|| {
            let mut hasher = muon::Hasher::new();
            for chunk in input.chunks(64 * KB) {
                hasher.update(black_box(chunk));
            }
            hasher.finalize()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_latency,
    bench_bulk,
    bench_comparison,
    bench_siblings,
    bench_streaming
);
criterion_main!(benches);
