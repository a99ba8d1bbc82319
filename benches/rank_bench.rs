//! Ranking throughput over synthetic candidate sets.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use riswis::ranking::rank;
use riswis::types::{Candidate, TierPolicy};

const TIERS: [&str; 3] = ["gold", "silver", "bronze"];

fn synthetic_candidates(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| Candidate {
            id: format!("doc-{i:06}"),
            raw_score: (i % 1000) as f64 / 1000.0,
            tier: TIERS[i % TIERS.len()].to_string(),
        })
        .collect()
}

fn policy() -> TierPolicy {
    [
        ("gold".to_string(), 1.0),
        ("silver".to_string(), 0.9),
        ("bronze".to_string(), 0.5),
    ]
    .into_iter()
    .collect()
}

fn bench_rank(c: &mut Criterion) {
    let policy = policy();

    for n in [100, 1_000, 10_000] {
        let candidates = synthetic_candidates(n);
        c.bench_function(&format!("rank_{}_top10", n), |b| {
            b.iter(|| rank(black_box(&candidates), &policy, 10, 42).unwrap())
        });
    }

    // Worst case for the tie-break: every final score identical.
    let tied: Vec<Candidate> = (0..1_000)
        .map(|i| Candidate {
            id: format!("doc-{i:06}"),
            raw_score: 0.5,
            tier: "gold".to_string(),
        })
        .collect();
    c.bench_function("rank_1000_all_tied", |b| {
        b.iter(|| rank(black_box(&tied), &policy, 10, 42).unwrap())
    });
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
