//! Criterion benchmarks for the steering combiners.
//! Focus sizes: k contributors in {1, 4, 16, 64}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use pednav::api::{
    Contribution, ContributorKind, DistanceWeighting, Level, SinglePrevalent, SteeringCfg,
    SteeringContext, SteeringStrategy, WeightedCombiner,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_contributions(k: usize, seed: u64) -> Vec<Contribution> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = vec![Contribution::new(
        ContributorKind::Navigation,
        Level::Individual,
        Vector2::new(1.0, 0.0),
    )];
    for i in 0..k {
        let theta: f64 = rng.gen::<f64>() * std::f64::consts::TAU;
        let v = Vector2::new(theta.cos(), theta.sin()) * rng.gen_range(0.1..2.0);
        let level = if i % 2 == 0 { Level::Group } else { Level::Individual };
        let target = Vector2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        out.push(Contribution::new(ContributorKind::Separation, level, v).with_target(target));
    }
    out
}

fn bench_steering(c: &mut Criterion) {
    let mut group = c.benchmark_group("steering");
    let ctx = SteeringContext {
        position: Vector2::zeros(),
        room: None,
    };
    for &k in &[1usize, 4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("weighted", k), &k, |b, &k| {
            let combiner = WeightedCombiner::new(DistanceWeighting);
            b.iter_batched(
                || random_contributions(k, 46),
                |cs| {
                    let _v = combiner.combine(&ctx, &cs);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("single_prevalent", k), &k, |b, &k| {
            let mut combiner = SinglePrevalent::from_cfg(DistanceWeighting, &SteeringCfg::default());
            b.iter_batched(
                || random_contributions(k, 47),
                |cs| {
                    let _v = combiner.compute_displacement(&ctx, &cs);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_steering);
criterion_main!(benches);
