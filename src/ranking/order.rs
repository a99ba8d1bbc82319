// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering: how ranked entries get sorted.
//!
//! Primary key is `final_score` descending. Ties break by candidate id
//! ascending - a fixed, seed-independent secondary key, so "deterministic"
//! never silently depends on input iteration order or on the run seed.
//!
//! Comparison uses `f64::total_cmp` rather than `partial_cmp`: scores are
//! validated finite before sorting, but total ordering means the comparator
//! can never panic or report a bogus `Equal` for exotic inputs.

use crate::types::RankedEntry;
use std::cmp::Ordering;

/// Compare two entries for ranking.
///
/// Sort order:
/// 1. **Final score** - descending (higher wins)
/// 2. **Candidate id** - ascending, for absolute determinism on ties
///
/// # Example
///
/// ```ignore
/// // Equal scores: "m" ranks before "x"
/// assert_eq!(compare_entries(&m_entry, &x_entry), Ordering::Less);
/// ```
pub fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    // Descending score: compare b against a
    match b.final_score.total_cmp(&a.final_score) {
        Ordering::Equal => a.id.cmp(&b.id),
        ord => ord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, final_score: f64) -> RankedEntry {
        RankedEntry {
            position: 0,
            id: id.to_string(),
            raw_score: final_score,
            tier: "gold".to_string(),
            multiplier: 1.0,
            final_score,
        }
    }

    #[test]
    fn higher_score_ranks_first() {
        let high = entry("z", 0.9);
        let low = entry("a", 0.1);
        assert_eq!(compare_entries(&high, &low), Ordering::Less);
        assert_eq!(compare_entries(&low, &high), Ordering::Greater);
    }

    #[test]
    fn equal_scores_order_by_ascending_id() {
        let m = entry("m", 0.5);
        let x = entry("x", 0.5);
        assert_eq!(compare_entries(&m, &x), Ordering::Less);
        assert_eq!(compare_entries(&x, &m), Ordering::Greater);
    }

    #[test]
    fn identical_entries_compare_equal() {
        let a = entry("a", 0.5);
        assert_eq!(compare_entries(&a, &a.clone()), Ordering::Equal);
    }
}
