// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structured failure modes for the ranking engine.
//!
//! Two families, both fatal to the run and raised before any scoring:
//! invalid run parameters (`InvalidK`, `EmptyCandidates`, `DuplicateId`,
//! `ScoreOutOfRange`, `InvalidMultiplier`) and tier validation
//! (`UnknownTier`). There is no partial output: either every candidate
//! validates, or the caller gets an error naming the offending input.

use std::fmt;

/// Error type for `rank` validation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum RankError {
    /// `k` must be at least 1.
    InvalidK,
    /// The candidate set is empty.
    EmptyCandidates,
    /// Two candidates share the same id, which would make the id tie-break
    /// (and therefore replay) ambiguous.
    DuplicateId { candidate_id: String },
    /// A candidate's `raw_score` is non-finite or outside `[0, 1]`.
    ScoreOutOfRange { candidate_id: String, raw_score: f64 },
    /// A referenced tier has a negative or non-finite multiplier.
    InvalidMultiplier { tier: String, multiplier: f64 },
    /// A candidate references a tier absent from the active policy.
    UnknownTier { candidate_id: String, tier: String },
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankError::InvalidK => {
                write!(f, "top_k must be >= 1")
            }
            RankError::EmptyCandidates => {
                write!(f, "candidate set is empty")
            }
            RankError::DuplicateId { candidate_id } => {
                write!(f, "duplicate candidate id '{}'", candidate_id)
            }
            RankError::ScoreOutOfRange {
                candidate_id,
                raw_score,
            } => {
                write!(
                    f,
                    "candidate '{}' has raw_score {} outside [0, 1]",
                    candidate_id, raw_score
                )
            }
            RankError::InvalidMultiplier { tier, multiplier } => {
                write!(
                    f,
                    "tier '{}' has invalid multiplier {} (must be finite and >= 0)",
                    tier, multiplier
                )
            }
            RankError::UnknownTier { candidate_id, tier } => {
                write!(
                    f,
                    "candidate '{}' references unknown tier '{}'",
                    candidate_id, tier
                )
            }
        }
    }
}

impl std::error::Error for RankError {}
