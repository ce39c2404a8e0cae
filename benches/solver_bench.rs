//! Criterion benchmarks for the hub-location engines.
//!
//! Synthetic ring networks isolate algorithm overhead from any
//! particular dataset; cost evaluation is benchmarked separately
//! because it dominates every engine's runtime.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hubloc::ga::{GaConfig, GaRunner};
use hubloc::model::{CostModel, SquareMatrix};
use hubloc::neighborhood::{self, Neighborhood};
use hubloc::sa::{self, SaConfig};
use hubloc::tabu::{TabuConfig, TabuRunner};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Ring network of `n` nodes with unit flow between distinct nodes.
fn ring_model(n: usize) -> CostModel {
    let mut distance = SquareMatrix::filled(n, 0.0);
    let mut flow = SquareMatrix::filled(n, 1.0);
    for i in 0..n {
        *flow.get_mut(i, i) = 0.0;
        for j in 0..n {
            let around = (i as i64 - j as i64).unsigned_abs() as usize;
            *distance.get_mut(i, j) = around.min(n - around) as f64;
        }
    }
    CostModel::new(distance, flow, 0.2).unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    for n in [10, 25, 55] {
        let model = ring_model(n);
        let mut rng = StdRng::seed_from_u64(42);
        let candidate = neighborhood::initial_candidate(&model, 3, &mut rng);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(model.evaluate(black_box(&candidate.assignment))));
        });
    }
    group.finish();
}

fn bench_neighbor_operators(c: &mut Criterion) {
    let model = ring_model(25);
    let mut rng = StdRng::seed_from_u64(42);
    let parent = neighborhood::initial_candidate(&model, 3, &mut rng);

    let mut group = c.benchmark_group("neighbor");
    for (name, op) in [
        ("hub_relocation", Neighborhood::HubRelocation),
        ("assignment_swap", Neighborhood::AssignmentSwap),
        ("reassignment", Neighborhood::Reassignment),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(op.neighbor(&model, &parent, &mut rng)));
        });
    }
    group.finish();
}

fn bench_engines(c: &mut Criterion) {
    let model = ring_model(25);

    c.bench_function("ga_short_run", |b| {
        let config = GaConfig::default()
            .with_hub_count(3)
            .with_population_size(30)
            .with_max_generations(20)
            .with_stagnation_limit(0)
            .with_parallel(false)
            .with_seed(42);
        b.iter(|| black_box(GaRunner::run(&model, &config).unwrap()));
    });

    c.bench_function("sa_short_run", |b| {
        let config = SaConfig::default()
            .with_hub_count(3)
            .with_t_max(100.0)
            .with_t_min(0.1)
            .with_steps(2000)
            .with_seed(42);
        b.iter(|| black_box(sa::anneal(&model, &config).unwrap()));
    });

    c.bench_function("tabu_short_run", |b| {
        let config = TabuConfig::default()
            .with_hub_count(3)
            .with_branching(50)
            .with_max_iterations(20)
            .with_stagnation_limit(0)
            .with_seed(42);
        b.iter(|| black_box(TabuRunner::run(&model, &config).unwrap()));
    });
}

criterion_group!(benches, bench_evaluate, bench_neighbor_operators, bench_engines);
criterion_main!(benches);
