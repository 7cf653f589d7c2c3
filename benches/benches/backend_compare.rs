//! Backend Comparison Benchmark
//!
//! Measures the dispatched backend against the forced-portable reference for
//! each operation. The outputs are bit-identical; only the throughput moves.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use muon::kernels::portable;
use rand::prelude::*;
use std::hint::black_box;

const KB: usize = 1024;

fn bench_hash_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("hash [{}]", muon::active_backend()));

    for (size, name) in [(64, "64B"), (4 * KB, "4KB"), (256 * KB, "256KB")] {
        let mut input = vec![0u8; size];
        rand::rng().fill(&mut input[..]);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            criterion::BenchmarkId::new("dispatched", name),
            &input,
            |b, data| b.iter(|| muon::hash(black_box(data))),
        );
        group.bench_with_input(
            criterion::BenchmarkId::new("portable", name),
            &input,
            |b, data| b.iter(|| portable::hash(black_box(data), 0)),
        );
    }
    group.finish();
}

fn bench_bytesum_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("bytesum [{}]", muon::active_backend()));

    let size = 256 * KB;
    let mut input = vec![0u8; size];
    rand::rng().fill(&mut input[..]);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("dispatched", |b| {
        b.iter(|| muon::bytesum(black_box(&input)))
    });
    group.bench_function("portable", |b| {
        b.iter(|| portable::bytesum(black_box(&input)))
    });
    group.finish();
}

fn bench_generate_backends(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("generate [{}]", muon::active_backend()));

    let size = 256 * KB;
    let mut out = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("dispatched", |b| {
        b.iter(|| muon::generate(black_box(&mut out), 7))
    });
    group.bench_function("portable", |b| {
        b.iter(|| portable::generate(black_box(&mut out), 7))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_hash_backends,
    bench_bytesum_backends,
    bench_generate_backends
);
criterion_main!(benches);
