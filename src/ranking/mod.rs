// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The ranking engine: validate → score → sort → truncate.
//!
//! This is the policy core. Given candidates with raw similarity scores and
//! a tier policy, it produces the top-K by `final_score = raw_score ×
//! policy[tier]`, with a fixed id-ascending tie-break. The whole pipeline is
//! a single-threaded, synchronous computation with no I/O and no shared
//! mutable state; logging is the caller's explicit step, never a hidden
//! side effect of ranking.
//!
//! # Determinism contract
//!
//! Identical `(candidates, policy, k, seed)` produce byte-identical output
//! across runs, processes, and machines. The inputs are validated finite,
//! the only arithmetic is one IEEE-754 multiply, and ordering uses
//! `total_cmp` with a seed-independent secondary key, so nothing in the
//! pipeline is platform- or iteration-order-dependent.

pub mod error;
pub mod order;

pub use error::RankError;
pub use order::compare_entries;

use crate::types::{Candidate, RankedEntry, RankedResult, TierPolicy};
use std::collections::HashSet;

/// Rank candidates under a tier policy and truncate to the top `k`.
///
/// Validation is all-or-nothing and happens before any scoring: a bad `k`,
/// an empty or duplicate-id set, an out-of-range score, an invalid
/// multiplier, or an unknown tier aborts the run with no partial result.
///
/// `k` is a ceiling, not a floor: if it exceeds the candidate count, all
/// candidates come back ranked.
///
/// The `seed` does not perturb ordering (the tie-break is fixed); it is
/// carried into the result so audit records and replay see the exact
/// parameters the run was invoked with.
pub fn rank(
    candidates: &[Candidate],
    policy: &TierPolicy,
    k: usize,
    seed: u64,
) -> Result<RankedResult, RankError> {
    if k == 0 {
        return Err(RankError::InvalidK);
    }
    if candidates.is_empty() {
        return Err(RankError::EmptyCandidates);
    }

    // Validation pass: collect each candidate's multiplier so scoring never
    // has to re-lookup (and never needs a fallback path).
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut multipliers: Vec<f64> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if !seen.insert(candidate.id.as_str()) {
            return Err(RankError::DuplicateId {
                candidate_id: candidate.id.clone(),
            });
        }

        if !candidate.raw_score.is_finite() || !(0.0..=1.0).contains(&candidate.raw_score) {
            return Err(RankError::ScoreOutOfRange {
                candidate_id: candidate.id.clone(),
                raw_score: candidate.raw_score,
            });
        }

        let multiplier = match policy.multiplier(&candidate.tier) {
            Some(m) => m,
            None => {
                return Err(RankError::UnknownTier {
                    candidate_id: candidate.id.clone(),
                    tier: candidate.tier.clone(),
                });
            }
        };

        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(RankError::InvalidMultiplier {
                tier: candidate.tier.clone(),
                multiplier,
            });
        }

        multipliers.push(multiplier);
    }

    // Scoring pass: pure multiply, candidates are never mutated.
    let mut entries: Vec<RankedEntry> = candidates
        .iter()
        .zip(multipliers)
        .map(|(candidate, multiplier)| RankedEntry {
            position: 0, // assigned after sort
            id: candidate.id.clone(),
            raw_score: candidate.raw_score,
            tier: candidate.tier.clone(),
            multiplier,
            final_score: candidate.raw_score * multiplier,
        })
        .collect();

    entries.sort_by(compare_entries);
    entries.truncate(k);

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.position = index + 1;
    }

    Ok(RankedResult::from_parts(seed, k, entries))
}
