//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::ranking::rank;
use crate::types::{AuditRecord, Candidate, RunContext, TierPolicy};

/// Create a candidate with the given id, score, and tier.
///
/// This is the canonical implementation used across all tests.
pub fn make_candidate(id: &str, raw_score: f64, tier: &str) -> Candidate {
    Candidate {
        id: id.to_string(),
        raw_score,
        tier: tier.to_string(),
    }
}

/// Create a policy from `(tier, multiplier)` pairs.
pub fn make_policy(pairs: &[(&str, f64)]) -> TierPolicy {
    pairs
        .iter()
        .map(|(tier, multiplier)| ((*tier).to_string(), *multiplier))
        .collect()
}

/// The gold/silver/bronze candidate set used by the scenario tests.
pub fn scenario_candidates() -> Vec<Candidate> {
    vec![
        make_candidate("a", 0.9, "gold"),
        make_candidate("b", 0.8, "silver"),
        make_candidate("c", 0.95, "bronze"),
    ]
}

/// The matching gold/silver/bronze policy.
pub fn scenario_policy() -> TierPolicy {
    make_policy(&[("gold", 1.0), ("silver", 0.9), ("bronze", 0.5)])
}

/// Build a complete, internally consistent audit record for the scenario
/// candidates under `seed` and `k`.
pub fn make_record(seed: u64, k: usize) -> AuditRecord {
    let policy = scenario_policy();
    let candidates = scenario_candidates();
    let ranking = rank(&candidates, &policy, k, seed).expect("scenario inputs always rank");
    let context = RunContext {
        seed,
        k,
        requester: "tests".to_string(),
        reason: "fixture".to_string(),
    };
    AuditRecord::new(&context, policy, candidates, ranking)
}
