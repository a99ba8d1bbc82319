// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a ranking run.
//!
//! These types define how candidates, tier policies, and ranked output fit
//! together. The engine consumes `Candidate` and `TierPolicy` and produces a
//! `RankedResult`; the audit layer snapshots all three into an `AuditRecord`.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Candidate**: `raw_score ∈ [0.0, 1.0]` and finite. The engine never
//!   mutates a candidate's score; it derives new values.
//!
//! - **TierPolicy**: every multiplier is finite and `≥ 0`. Every tier
//!   referenced by a candidate must exist in the policy; absence is a hard
//!   validation failure, never a silent default.
//!
//! - **RankedResult**: entries sorted by `(final_score desc, id asc)`,
//!   positions contiguous from 1, `len ≤ k`. Never reordered after
//!   construction.
//!
//! Rather than trusting yourself to remember these, use `VerifiedRanking`
//! from `verify` - it enforces the result invariants at the type level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One retrievable document instance in a query's candidate set.
///
/// `id` is an opaque stable identifier, unique within the set. `raw_score`
/// is the upstream similarity in `[0, 1]` (simulated or embedding-derived);
/// `tier` names the credibility category that selects the multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub raw_score: f64,
    pub tier: String,
}

/// Mapping from tier label to a non-negative score multiplier.
///
/// Loaded once per run and immutable for the duration of a ranking
/// operation, so it may be shared read-only across concurrent invocations.
///
/// Backed by a `BTreeMap` so every serialization of the same policy is
/// byte-identical (sorted keys) - the audit log's CRC check depends on a
/// canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierPolicy {
    multipliers: BTreeMap<String, f64>,
}

impl TierPolicy {
    /// Wrap a tier → multiplier mapping. No validation happens here;
    /// the engine checks multipliers eagerly at the top of `rank`.
    pub fn new(multipliers: BTreeMap<String, f64>) -> Self {
        Self { multipliers }
    }

    /// Look up the multiplier for a tier label.
    pub fn multiplier(&self, tier: &str) -> Option<f64> {
        self.multipliers.get(tier).copied()
    }

    /// Iterate over `(tier, multiplier)` pairs in sorted tier order.
    pub fn tiers(&self) -> impl Iterator<Item = (&str, f64)> {
        self.multipliers.iter().map(|(t, m)| (t.as_str(), *m))
    }

    /// Number of tiers defined by this policy.
    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    /// Whether the policy defines no tiers at all.
    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

impl FromIterator<(String, f64)> for TierPolicy {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            multipliers: iter.into_iter().collect(),
        }
    }
}

/// One ranked candidate, annotated with everything needed to explain
/// (and re-derive) its placement.
///
/// `position` is 1-based. `final_score` is always exactly
/// `raw_score * multiplier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub position: usize,
    pub id: String,
    pub raw_score: f64,
    pub tier: String,
    pub multiplier: f64,
    pub final_score: f64,
}

/// The ordered output of one ranking invocation: the top-K candidates by
/// `(final_score desc, id asc)`.
///
/// Fields are private so a result can never be reordered after
/// construction - it is consumed read-only by the audit layer and callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    seed: u64,
    k: usize,
    entries: Vec<RankedEntry>,
}

impl RankedResult {
    /// Used only by the ranking engine; the entries must already be sorted
    /// and truncated.
    pub(crate) fn from_parts(seed: u64, k: usize, entries: Vec<RankedEntry>) -> Self {
        Self { seed, k, entries }
    }

    /// The seed the run was invoked with. Carried for audit/replay; the
    /// tie-break rule is seed-independent.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The requested top-K ceiling. `entries().len() ≤ k` always holds.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The ranked entries, best first.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Number of ranked entries (`min(k, candidate count)`).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True only for a result that was never produced by `rank` (which
    /// rejects empty candidate sets), e.g. one deserialized from a log.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The top-ranked entry.
    pub fn top(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }
}

/// Who ran a ranking, why, and with what parameters.
///
/// Captured once per invocation and persisted verbatim into the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunContext {
    pub seed: u64,
    pub k: usize,
    pub requester: String,
    pub reason: String,
}

/// An immutable snapshot of one ranking invocation: inputs, policy, and
/// output, sufficient to reproduce the run exactly.
///
/// Created once at the end of a successful ranking operation and appended
/// to the audit log; existing records are never rewritten or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub seed: u64,
    pub k: usize,
    pub requester: String,
    pub reason: String,
    pub policy: TierPolicy,
    pub candidates: Vec<Candidate>,
    pub ranking: RankedResult,
}

impl AuditRecord {
    /// Build a record from a run's context and outcome, timestamped now.
    pub fn new(
        context: &RunContext,
        policy: TierPolicy,
        candidates: Vec<Candidate>,
        ranking: RankedResult,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            seed: context.seed,
            k: context.k,
            requester: context.requester.clone(),
            reason: context.reason.clone(),
            policy,
            candidates,
            ranking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_policy_lookup() {
        let policy: TierPolicy = [("gold".to_string(), 1.0), ("silver".to_string(), 0.9)]
            .into_iter()
            .collect();

        assert_eq!(policy.multiplier("gold"), Some(1.0));
        assert_eq!(policy.multiplier("unrated"), None);
        assert_eq!(policy.len(), 2);
    }

    #[test]
    fn tier_policy_serializes_with_sorted_keys() {
        // Insertion order must not leak into the serialized form.
        let a: TierPolicy = [("silver".to_string(), 0.9), ("gold".to_string(), 1.0)]
            .into_iter()
            .collect();
        let b: TierPolicy = [("gold".to_string(), 1.0), ("silver".to_string(), 0.9)]
            .into_iter()
            .collect();

        let ja = serde_json::to_string(&a).unwrap();
        let jb = serde_json::to_string(&b).unwrap();
        assert_eq!(ja, jb);
        assert_eq!(ja, r#"{"gold":1.0,"silver":0.9}"#);
    }

    #[test]
    fn tier_policy_roundtrips_through_json() {
        let policy: TierPolicy = [("bronze".to_string(), 0.5)].into_iter().collect();
        let json = serde_json::to_string(&policy).unwrap();
        let back: TierPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, back);
    }
}
