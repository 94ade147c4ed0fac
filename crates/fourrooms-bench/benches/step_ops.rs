//! Criterion benchmarks for batched stepping.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fourrooms_bench::{batch_profile, build, minigrid_profile, scripted_actions, BATCH_SIZES};

/// Benchmark: one `step()` across the batch, binary encoding.
fn bench_step_binary(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_binary");
    for n in BATCH_SIZES {
        let mut engine = build(batch_profile(n, 42));
        let mut tick = 0u64;
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                scripted_actions(tick, engine.buffers_mut().actions_mut());
                engine.step().unwrap();
                tick += 1;
                std::hint::black_box(engine.buffers().rewards());
            });
        });
    }
    group.finish();
}

/// Benchmark: one `step()` across the batch, MiniGrid encoding with occlusion.
fn bench_step_minigrid(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_minigrid");
    for n in BATCH_SIZES {
        let mut engine = build(minigrid_profile(n, 42));
        let mut tick = 0u64;
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                scripted_actions(tick, engine.buffers_mut().actions_mut());
                engine.step().unwrap();
                tick += 1;
                std::hint::black_box(engine.buffers().observations());
            });
        });
    }
    group.finish();
}

/// Benchmark: `reset_all()` over 1024 instances.
fn bench_reset_all_1024(c: &mut Criterion) {
    let mut engine = build(batch_profile(1024, 0));
    let mut seed = 0u64;
    c.bench_function("reset_all_1024", |b| {
        b.iter(|| {
            seed += 1;
            engine.reset_all(seed).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_step_binary,
    bench_step_minigrid,
    bench_reset_all_1024
);
criterion_main!(benches);
