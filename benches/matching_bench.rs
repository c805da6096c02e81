//! Criterion benchmarks for the deferred-acceptance engine.
//!
//! Uses seeded random instances so runs are comparable.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use u_matching::da::{DeferredAcceptance, MatchConfig};
use u_matching::preferences::{Group, MemberPreferences};

// ===========================================================================
// Random instances
// ===========================================================================

/// Each member ranks a random `list_len` subset of the other side, with
/// ranks drawn from `1..=tiers` so that ties occur.
fn random_group(
    rng: &mut StdRng,
    prefix: &str,
    size: usize,
    opponent_prefix: &str,
    opponents: usize,
    list_len: usize,
    tiers: i64,
) -> Group {
    let mut pool: Vec<usize> = (0..opponents).collect();
    let mut group = Group::new();
    for i in 0..size {
        pool.shuffle(rng);
        let mut ranked = Vec::with_capacity(list_len);
        for &j in &pool[..list_len.min(opponents)] {
            ranked.push((rng.random_range(1..=tiers), format!("{opponent_prefix}{j}")));
        }
        group.push(MemberPreferences::new(format!("{prefix}{i}"), ranked));
    }
    group
}

fn one_to_one_instance(n: usize, list_len: usize, tiers: i64) -> DeferredAcceptance {
    let mut rng = StdRng::seed_from_u64(42);
    let proposers = random_group(&mut rng, "p", n, "b", n, list_len, tiers);
    let partners = random_group(&mut rng, "b", n, "p", n, n, tiers);
    DeferredAcceptance::new(&proposers, &partners, &MatchConfig::one_to_one())
        .expect("random instance is valid")
}

fn many_to_one_instance(n: usize, partners: usize, capacity: usize) -> DeferredAcceptance {
    let mut rng = StdRng::seed_from_u64(7);
    let proposer_group = random_group(&mut rng, "p", n, "b", partners, partners, partners as i64);
    let partner_group = random_group(&mut rng, "b", partners, "p", n, n, n as i64);
    let config = MatchConfig::many_to_one()
        .with_capacities((0..partners).map(|j| (format!("b{j}"), capacity)));
    DeferredAcceptance::new(&proposer_group, &partner_group, &config)
        .expect("random instance is valid")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_one_to_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("one_to_one");
    group.sample_size(20);

    for (n, list_len, tiers) in [(100usize, 100usize, 100i64), (1000, 50, 10), (1000, 1000, 1000)] {
        let da = one_to_one_instance(n, list_len, tiers);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_l{}_t{}", n, list_len, tiers), n),
            &da,
            |b, da| b.iter(|| black_box(black_box(da).run())),
        );
    }
    group.finish();
}

fn bench_many_to_one(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_to_one");
    group.sample_size(20);

    for (n, partners, capacity) in [(500usize, 50usize, 10usize), (2000, 40, 50)] {
        let da = many_to_one_instance(n, partners, capacity);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_m{}_c{}", n, partners, capacity), n),
            &da,
            |b, da| b.iter(|| black_box(black_box(da).run())),
        );
    }
    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group.sample_size(10);

    for &n in &[100usize, 500] {
        let mut rng = StdRng::seed_from_u64(1);
        let proposers = random_group(&mut rng, "p", n, "b", n, n, n as i64);
        let partners = random_group(&mut rng, "b", n, "p", n, n, n as i64);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(proposers, partners), |b, (p, q)| {
            b.iter(|| {
                let da = DeferredAcceptance::new(black_box(p), black_box(q), &MatchConfig::default());
                black_box(da)
            })
        });
    }
    group.finish();
}

fn bench_partitioned(c: &mut Criterion) {
    let mut group = c.benchmark_group("partitioned");
    group.sample_size(20);

    // Short lists over many partners yield many small components.
    let da = one_to_one_instance(2000, 2, 2);
    group.bench_function("run", |b| b.iter(|| black_box(da.run())));
    group.bench_function("run_partitioned", |b| b.iter(|| black_box(da.run_partitioned())));
    #[cfg(feature = "parallel")]
    group.bench_function("run_parallel", |b| b.iter(|| black_box(da.run_parallel())));
    group.finish();
}

criterion_group!(
    benches,
    bench_one_to_one,
    bench_many_to_one,
    bench_construction,
    bench_partitioned
);
criterion_main!(benches);
