// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Seeded score simulation, kept outside the ranking engine.
//!
//! The engine's determinism contract is independent of where scores come
//! from. This module is the pluggable source for runs without real
//! similarity scores: a `StdRng` seeded from the run seed assigns each id a
//! score in `[0, 1]`.
//!
//! Ids are scored in sorted order, so the same `(seed, id set)` produces
//! the same scores no matter how the manifest happens to order its entries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

/// A source of raw similarity scores for candidate ids.
///
/// Implemented by the simulator here; an embedding-backed source would
/// implement the same trait upstream.
pub trait ScoreSource {
    /// The score for an id, or `None` if this source knows nothing about it.
    fn score_for(&self, id: &str) -> Option<f64>;
}

/// Deterministic simulated scores for a fixed id set.
#[derive(Debug, Clone)]
pub struct SimulatedScores {
    scores: BTreeMap<String, f64>,
}

impl SimulatedScores {
    /// Assign every id a score in `[0, 1]` drawn from a generator seeded
    /// with `seed`. Duplicate ids collapse to one assignment.
    pub fn generate<I, S>(seed: u64, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sorted: Vec<String> = ids.into_iter().map(Into::into).collect();
        sorted.sort();
        sorted.dedup();

        let mut rng = StdRng::seed_from_u64(seed);
        let scores = sorted
            .into_iter()
            .map(|id| {
                let score = rng.random_range(0.0..=1.0);
                (id, score)
            })
            .collect();

        Self { scores }
    }

    /// Number of ids with an assigned score.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no ids were scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl ScoreSource for SimulatedScores {
    fn score_for(&self, id: &str) -> Option<f64> {
        self.scores.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_scores() {
        let a = SimulatedScores::generate(42, ["x", "y", "z"]);
        let b = SimulatedScores::generate(42, ["x", "y", "z"]);

        for id in ["x", "y", "z"] {
            assert_eq!(a.score_for(id), b.score_for(id));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = SimulatedScores::generate(1, ["x", "y", "z"]);
        let b = SimulatedScores::generate(2, ["x", "y", "z"]);

        let same = ["x", "y", "z"]
            .iter()
            .all(|id| a.score_for(id) == b.score_for(id));
        assert!(!same, "seeds 1 and 2 produced identical score sets");
    }

    #[test]
    fn id_order_does_not_matter() {
        let forward = SimulatedScores::generate(7, ["a", "b", "c"]);
        let shuffled = SimulatedScores::generate(7, ["c", "a", "b"]);

        for id in ["a", "b", "c"] {
            assert_eq!(forward.score_for(id), shuffled.score_for(id));
        }
    }

    #[test]
    fn scores_stay_in_unit_range() {
        let scores = SimulatedScores::generate(99, (0..200).map(|i| format!("doc-{i}")));
        assert_eq!(scores.len(), 200);
        for i in 0..200 {
            let score = scores.score_for(&format!("doc-{i}")).unwrap();
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn unknown_id_has_no_score() {
        let scores = SimulatedScores::generate(1, ["a"]);
        assert_eq!(scores.score_for("b"), None);
    }
}
