//! Benchmarks for per-tick deformation and sampling.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use particle_forms::engine;
use particle_forms::sampling::DEFAULT_SEED;
use particle_forms::shape::sample;
use particle_forms::{AnimationClock, GpuParticle, ParameterSet, ParticleBuffer, ShapeKind, DEFAULT_CAPACITY};

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");
    let params = ParameterSet::default().with_speed(5.0);
    let clock = AnimationClock::at(12.5);

    for kind in ShapeKind::ALL {
        let mut buffer = ParticleBuffer::with_capacity(DEFAULT_CAPACITY);
        sample(kind, &mut buffer, &params, DEFAULT_SEED);

        group.bench_with_input(BenchmarkId::from_parameter(kind.id()), &kind, |b, &kind| {
            b.iter(|| engine::advance(kind, black_box(&mut buffer), &clock, &params, true))
        });
    }

    group.finish();
}

fn bench_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample");
    let params = ParameterSet::default();
    let mut buffer = ParticleBuffer::with_capacity(DEFAULT_CAPACITY);

    for kind in [
        ShapeKind::Icosahedron,
        ShapeKind::FibonacciSphere,
        ShapeKind::MultiSphere25,
        ShapeKind::LinesSphere,
        ShapeKind::Jellyfish,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(kind.id()), &kind, |b, &kind| {
            b.iter(|| black_box(sample(kind, &mut buffer, &params, DEFAULT_SEED)))
        });
    }

    group.finish();
}

fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("lines_sphere_density");
    let clock = AnimationClock::at(3.0);

    for density in [0.1_f32, 1.0, 3.0] {
        let params = ParameterSet::default().with_density(density);
        let mut buffer = ParticleBuffer::with_capacity(DEFAULT_CAPACITY);
        sample(ShapeKind::LinesSphere, &mut buffer, &params, DEFAULT_SEED);

        group.bench_with_input(BenchmarkId::from_parameter(density), &density, |b, _| {
            b.iter(|| {
                engine::advance(ShapeKind::LinesSphere, black_box(&mut buffer), &clock, &params, false)
            })
        });
    }

    group.finish();
}

fn bench_gpu_rows(c: &mut Criterion) {
    let params = ParameterSet::default();
    let mut buffer = ParticleBuffer::with_capacity(DEFAULT_CAPACITY);
    sample(ShapeKind::LinesSphere, &mut buffer, &params, DEFAULT_SEED);
    let mut rows: Vec<GpuParticle> = Vec::with_capacity(DEFAULT_CAPACITY);

    c.bench_function("write_gpu_rows", |b| {
        b.iter(|| {
            buffer.write_gpu_rows(&mut rows);
            black_box(rows.len())
        })
    });
}

criterion_group!(benches, bench_advance, bench_sample, bench_density, bench_gpu_rows);
criterion_main!(benches);
