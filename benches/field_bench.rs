//! Benchmarks for the grid-based projections, the per-tick hot path.
//!
//! Run with: cargo bench
//!
//! The curve projections are a few hundred sine evaluations and never
//! matter; the dense grids evaluate the phasor once per cell and set the
//! soft per-tick budget.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use phasefield::bank::{presets, OscillatorBank};
use phasefield::render::{fluid, ripple, standing, ViewState, Viewport};

const GRID_SIZES: &[usize] = &[48, 96, 192];

fn bench_bank() -> OscillatorBank {
    presets::harmonic_series()
}

fn bench_standing_field(c: &mut Criterion) {
    let bank = bench_bank();
    let mut group = c.benchmark_group("render/standing_field");
    for &size in GRID_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let viewport = Viewport::new(size, size);
            b.iter(|| standing::render(bank.oscillators(), 1.37, viewport, ViewState::default()));
        });
    }
    group.finish();
}

fn bench_ripple_tank(c: &mut Criterion) {
    let bank = bench_bank();
    let mut group = c.benchmark_group("render/ripple_tank");
    for &size in GRID_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let viewport = Viewport::new(size, size);
            b.iter(|| ripple::render(bank.oscillators(), 1.37, viewport, ViewState::default()));
        });
    }
    group.finish();
}

fn bench_fluid_mesh(c: &mut Criterion) {
    let bank = bench_bank();
    let mut group = c.benchmark_group("render/fluid_mesh");
    let viewport = Viewport::new(160, 120);
    group.bench_function("40x40", |b| {
        b.iter(|| fluid::render(bank.oscillators(), 1.37, viewport, ViewState::default()));
    });
    group.finish();
}

criterion_group!(benches, bench_standing_field, bench_ripple_tank, bench_fluid_mesh);
criterion_main!(benches);
