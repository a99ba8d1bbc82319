// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type wrappers that make invalid rankings unrepresentable.
//!
//! Instead of hoping a `RankedResult` pulled from a log is still what the
//! engine produced, wrap it in `VerifiedRanking`. It checks every result
//! invariant at construction and guarantees them forever after. The cost is
//! paid once upfront, then readers can trust the ordering without
//! re-deriving it.
//!
//! # Invariants (enforced at construction)
//!
//! - Entries sorted by `(final_score desc, id asc)`
//! - Positions contiguous: `entries[i].position == i + 1`
//! - `len ≤ k`
//! - `final_score == raw_score × multiplier`, exactly
//! - Every entry's multiplier matches the policy snapshot for its tier

use crate::ranking::compare_entries;
use crate::types::{RankedEntry, RankedResult, TierPolicy};
use std::cmp::Ordering;
use std::fmt;

/// Error type for ranking invariant violations.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantError {
    /// Entries are not in `(final_score desc, id asc)` order at `position`.
    NotSorted { position: usize },
    /// `entries[index].position` is not `index + 1`.
    BadPosition {
        index: usize,
        expected: usize,
        actual: usize,
    },
    /// The result holds more entries than its own `k` permits.
    TooManyEntries { len: usize, k: usize },
    /// A recorded `final_score` is not `raw_score × multiplier`.
    ScoreMismatch {
        candidate_id: String,
        expected: f64,
        actual: f64,
    },
    /// An entry's tier is absent from the policy snapshot.
    UnknownTier { candidate_id: String, tier: String },
    /// An entry's recorded multiplier disagrees with the policy snapshot.
    MultiplierDrift {
        candidate_id: String,
        tier: String,
        recorded: f64,
        policy: f64,
    },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::NotSorted { position } => {
                write!(f, "ranking not sorted at position {}", position)
            }
            InvariantError::BadPosition {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "entry at index {} has position {} (expected {})",
                    index, actual, expected
                )
            }
            InvariantError::TooManyEntries { len, k } => {
                write!(f, "{} entries exceed top_k {}", len, k)
            }
            InvariantError::ScoreMismatch {
                candidate_id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "candidate '{}' has final_score {} but raw × multiplier = {}",
                    candidate_id, actual, expected
                )
            }
            InvariantError::UnknownTier { candidate_id, tier } => {
                write!(
                    f,
                    "candidate '{}' references tier '{}' absent from the policy snapshot",
                    candidate_id, tier
                )
            }
            InvariantError::MultiplierDrift {
                candidate_id,
                tier,
                recorded,
                policy,
            } => {
                write!(
                    f,
                    "candidate '{}' recorded multiplier {} but policy['{}'] = {}",
                    candidate_id, recorded, tier, policy
                )
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// A ranked result whose invariants have been verified against the policy
/// snapshot it was produced under.
#[derive(Debug, Clone)]
pub struct VerifiedRanking {
    inner: RankedResult,
}

impl VerifiedRanking {
    /// Verify a result against its policy snapshot.
    ///
    /// Returns `Err` on the first violated invariant. The score check uses
    /// exact equality: the engine computes a single IEEE-754 multiply and
    /// JSON round-trips f64 losslessly, so any difference means the record
    /// was tampered with or produced by different code.
    pub fn new(result: RankedResult, policy: &TierPolicy) -> Result<Self, InvariantError> {
        let entries = result.entries();

        if entries.len() > result.k() {
            return Err(InvariantError::TooManyEntries {
                len: entries.len(),
                k: result.k(),
            });
        }

        for (index, entry) in entries.iter().enumerate() {
            let expected_position = index + 1;
            if entry.position != expected_position {
                return Err(InvariantError::BadPosition {
                    index,
                    expected: expected_position,
                    actual: entry.position,
                });
            }

            Self::check_entry(entry, policy)?;

            if index > 0 && compare_entries(&entries[index - 1], entry) == Ordering::Greater {
                return Err(InvariantError::NotSorted { position: index });
            }
        }

        Ok(Self { inner: result })
    }

    fn check_entry(entry: &RankedEntry, policy: &TierPolicy) -> Result<(), InvariantError> {
        let policy_multiplier = match policy.multiplier(&entry.tier) {
            Some(m) => m,
            None => {
                return Err(InvariantError::UnknownTier {
                    candidate_id: entry.id.clone(),
                    tier: entry.tier.clone(),
                });
            }
        };

        if entry.multiplier != policy_multiplier {
            return Err(InvariantError::MultiplierDrift {
                candidate_id: entry.id.clone(),
                tier: entry.tier.clone(),
                recorded: entry.multiplier,
                policy: policy_multiplier,
            });
        }

        let expected = entry.raw_score * entry.multiplier;
        if entry.final_score != expected {
            return Err(InvariantError::ScoreMismatch {
                candidate_id: entry.id.clone(),
                expected,
                actual: entry.final_score,
            });
        }

        Ok(())
    }

    /// The verified entries, best first.
    pub fn entries(&self) -> &[RankedEntry] {
        self.inner.entries()
    }

    /// Unwrap back to the plain result.
    pub fn into_inner(self) -> RankedResult {
        self.inner
    }
}
