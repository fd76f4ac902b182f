//! Benchmarks for plan generation and validation.
//!
//! Run with: cargo bench --package homeplan-logic --bench generate

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use homeplan_logic::generator::FloorPlanGenerator;
use homeplan_logic::neighborhood::generate_neighborhood;
use homeplan_logic::presets::mansion;
use homeplan_logic::validation::validate_plan;

fn benchmark_generate(c: &mut Criterion) {
    let generator = FloorPlanGenerator::default();

    c.bench_function("generate_seeded", |b| {
        let mut seed = 0u32;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(generator.generate_seeded(seed))
        });
    });
}

fn benchmark_neighborhood(c: &mut Criterion) {
    c.bench_function("generate_neighborhood", |b| {
        b.iter(|| black_box(generate_neighborhood(black_box(42))));
    });
}

fn benchmark_validate(c: &mut Criterion) {
    let plan = mansion().unwrap();

    c.bench_function("validate_mansion", |b| {
        b.iter(|| black_box(validate_plan(black_box(&plan))));
    });
}

criterion_group!(benches, benchmark_generate, benchmark_neighborhood, benchmark_validate);
criterion_main!(benches);
