//! Criterion micro-benchmarks for map generation and reachability.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fourrooms_space::{is_connected, shared_map, GridMap};

/// Benchmark: build a fresh map at several sizes.
fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("four_rooms_generate");
    for size in [19u32, 101, 1001] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| std::hint::black_box(GridMap::four_rooms(size).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: full BFS connectivity check on a 101x101 map.
fn bench_connectivity_101(c: &mut Criterion) {
    let map = GridMap::four_rooms(101).unwrap();
    c.bench_function("is_connected_101", |b| {
        b.iter(|| std::hint::black_box(is_connected(&map)));
    });
}

/// Benchmark: cache hit on the shared map.
fn bench_shared_map_hit(c: &mut Criterion) {
    let held = shared_map(19).unwrap();
    c.bench_function("shared_map_hit", |b| {
        b.iter(|| std::hint::black_box(shared_map(19).unwrap()));
    });
    drop(held);
}

criterion_group!(
    benches,
    bench_generate,
    bench_connectivity_101,
    bench_shared_map_hit
);
criterion_main!(benches);
