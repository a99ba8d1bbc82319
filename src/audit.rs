// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The audit log: one immutable record per ranking invocation.
//!
//! Records are persisted as line-oriented JSON - human-inspectable with
//! `less`, machine-parseable with anything that reads JSONL. Append is the
//! only permitted mutation; existing lines are never rewritten or deleted.
//!
//! # Wire format
//!
//! ```text
//! {"crc":3633523476,"record":{...AuditRecord...}}\n
//! ```
//!
//! The CRC32 covers the canonical serialization of the record payload.
//! `TierPolicy` serializes with sorted keys and struct fields serialize in
//! declaration order, so re-encoding a parsed record reproduces the exact
//! bytes the checksum was computed over. Readers verify every line and
//! reject corruption instead of silently returning damaged history.
//!
//! # Replay
//!
//! Every record carries the full `(candidates, policy, k, seed)` snapshot,
//! so `replay` can re-invoke the engine and compare against the recorded
//! ranking. This is the primary testable contract of the whole system.

use crate::ranking::{rank, RankError};
use crate::types::{AuditRecord, RankedResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// One line of the on-disk log: checksum plus payload.
#[derive(Serialize, Deserialize)]
struct WireLine {
    crc: u32,
    record: AuditRecord,
}

/// Error type for audit persistence and parsing failures.
#[derive(Debug)]
pub enum AuditError {
    /// The sink could not be opened or written. The ranking result itself
    /// is unaffected; callers decide whether an un-audited run is
    /// acceptable.
    Persistence { path: PathBuf, source: io::Error },
    /// A record could not be serialized.
    Encode { source: serde_json::Error },
    /// A log line is not valid JSON in the expected shape.
    Malformed {
        line: usize,
        source: serde_json::Error,
    },
    /// A log line's payload does not match its recorded checksum.
    ChecksumMismatch {
        line: usize,
        expected: u32,
        actual: u32,
    },
}

impl fmt::Display for AuditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditError::Persistence { path, source } => {
                write!(f, "audit log {}: {}", path.display(), source)
            }
            AuditError::Encode { source } => {
                write!(f, "audit record could not be encoded: {}", source)
            }
            AuditError::Malformed { line, source } => {
                write!(f, "audit log line {} is malformed: {}", line, source)
            }
            AuditError::ChecksumMismatch {
                line,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "audit log line {} is corrupt: checksum {:#010x} != recorded {:#010x}",
                    line, actual, expected
                )
            }
        }
    }
}

impl std::error::Error for AuditError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuditError::Persistence { source, .. } => Some(source),
            AuditError::Encode { source } | AuditError::Malformed { source, .. } => Some(source),
            AuditError::ChecksumMismatch { .. } => None,
        }
    }
}

/// An append-only audit sink backed by a JSONL file.
///
/// One `AuditLog` value per writer. Each append is a single `O_APPEND`
/// write of one complete line, so concurrent ranking processes sharing a
/// log file cannot interleave partial records.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    /// Point at a log file. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The underlying log path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a checksummed JSON line.
    pub fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let payload =
            serde_json::to_string(record).map_err(|source| AuditError::Encode { source })?;
        let crc = crc32fast::hash(payload.as_bytes());
        let line = format!("{{\"crc\":{},\"record\":{}}}\n", crc, payload);

        let persistence = |source: io::Error| AuditError::Persistence {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(persistence)?;
        file.write_all(line.as_bytes()).map_err(persistence)?;
        file.flush().map_err(persistence)?;

        Ok(())
    }

    /// Parse the whole log back into records, verifying every checksum.
    ///
    /// Line numbers in errors are 1-based, matching what `less -N` shows.
    pub fn read_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            AuditError::Persistence {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut records = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_number = index + 1;

            let wire: WireLine = serde_json::from_str(line).map_err(|source| {
                AuditError::Malformed {
                    line: line_number,
                    source,
                }
            })?;

            let payload = serde_json::to_string(&wire.record)
                .map_err(|source| AuditError::Encode { source })?;
            let actual = crc32fast::hash(payload.as_bytes());
            if actual != wire.crc {
                return Err(AuditError::ChecksumMismatch {
                    line: line_number,
                    expected: wire.crc,
                    actual,
                });
            }

            records.push(wire.record);
        }

        Ok(records)
    }
}

/// Error type for replay failures.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// The recorded inputs no longer pass engine validation.
    Rank { source: RankError },
    /// The engine reproduced a different ranking than the record holds.
    /// `position` is the first 1-based rank at which they diverge, or the
    /// length difference point when one output is a prefix of the other.
    Mismatch { position: usize },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Rank { source } => {
                write!(f, "recorded inputs failed to re-rank: {}", source)
            }
            ReplayError::Mismatch { position } => {
                write!(f, "replay diverged from the record at rank {}", position)
            }
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplayError::Rank { source } => Some(source),
            ReplayError::Mismatch { .. } => None,
        }
    }
}

/// Re-invoke the engine with a record's exact `(candidates, policy, k,
/// seed)` and check that it reproduces the recorded ranking.
pub fn replay(record: &AuditRecord) -> Result<RankedResult, ReplayError> {
    let result = rank(&record.candidates, &record.policy, record.k, record.seed)
        .map_err(|source| ReplayError::Rank { source })?;

    if result != record.ranking {
        let recorded = record.ranking.entries();
        let replayed = result.entries();
        let diverged = recorded
            .iter()
            .zip(replayed)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| recorded.len().min(replayed.len()));
        return Err(ReplayError::Mismatch {
            position: diverged + 1,
        });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_candidate, make_policy, make_record};

    #[test]
    fn replay_reproduces_a_faithful_record() {
        let record = make_record(42, 2);
        let result = replay(&record).unwrap();
        assert_eq!(result, record.ranking);
    }

    #[test]
    fn replay_flags_a_substituted_ranking() {
        let mut record = make_record(42, 2);
        // Swap in a ranking produced under a different policy.
        let other_policy = make_policy(&[("gold", 0.1), ("silver", 0.9), ("bronze", 0.5)]);
        record.ranking = rank(&record.candidates, &other_policy, 2, 42).unwrap();

        let err = replay(&record).unwrap_err();
        assert!(matches!(err, ReplayError::Mismatch { .. }));
    }

    #[test]
    fn replay_surfaces_validation_failures() {
        let mut record = make_record(42, 2);
        record.candidates.push(make_candidate("z", 0.4, "unrated"));

        let err = replay(&record).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Rank {
                source: RankError::UnknownTier { .. }
            }
        ));
    }
}
