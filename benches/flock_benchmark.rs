/*
 * Boid Simulation Benchmark
 *
 * Measures one flock tick (the O(n²) neighbour scan plus integration)
 * for the population sizes the simulation targets, under both update orders.
 */

use boid_flock::{Flock, SimulationParams, UpdateOrder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

fn bench_flock_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_update");

    for update_order in [UpdateOrder::Snapshot, UpdateOrder::Immediate] {
        for num_boids in [50, 100, 200, 400] {
            let params = SimulationParams {
                boids_num: num_boids,
                update_order,
                ..Default::default()
            };
            let id = BenchmarkId::new(format!("{update_order:?}"), num_boids);

            group.bench_with_input(id, &params, |b, params| {
                let mut flock = Flock::new(params);
                b.iter(|| {
                    flock.update(black_box(params));
                });
            });
        }
    }

    group.finish();
}

fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing");

    for smooth in [false, true] {
        let params = SimulationParams {
            boids_num: 200,
            smooth,
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(smooth), &params, |b, params| {
            let mut flock = Flock::new(params);
            b.iter(|| {
                flock.update(black_box(params));
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_flock_update, bench_smoothing
}

criterion_main!(benches);
