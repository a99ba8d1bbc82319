//! Deterministic, auditable retrieval ranking.
//!
//! This crate is a retrieval-ranking policy layer: given candidate documents
//! with similarity scores and credibility tiers, it produces a
//! deterministic, explainable, reproducible ranking. Tier multipliers are
//! applied to raw scores, ties break by ascending candidate id, output is
//! truncated to the top-K, and every invocation can be captured in an
//! append-only audit log that supports exact replay.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌─────────────┐
//! │  config.rs   │    │ manifest.rs  │───▶│ simulate.rs │
//! │ (TierPolicy, │    │ (candidates  │    │ (seeded     │
//! │  run params) │    │  per query)  │    │  scores)    │
//! └──────┬───────┘    └──────┬───────┘    └──────┬──────┘
//!        │                   │                   │
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     ranking/                        │
//! │   validate → score (raw × multiplier) → sort →      │
//! │   truncate, with (final_score desc, id asc) order   │
//! └──────────────────────────┬──────────────────────────┘
//!                            │ RankedResult
//!                            ▼
//! ┌──────────────┐    ┌──────────────┐
//! │   audit.rs   │◀──▶│  verify.rs   │
//! │ (JSONL log,  │    │ (invariant   │
//! │  replay)     │    │  wrappers)   │
//! └──────────────┘    └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use riswis::{rank, AuditLog, AuditRecord, RunContext, TierPolicy};
//!
//! let result = rank(&candidates, &policy, 10, 42)?;
//! let record = AuditRecord::new(&context, policy, candidates, result.clone());
//! AuditLog::new("logs/riswis_audit.jsonl").append(&record)?;
//! ```
//!
//! The engine is a synchronous, side-effect-free computation; logging is a
//! separate explicit step, so a persistence failure never discards a valid
//! ranking.

// Module declarations
pub mod audit;
pub mod config;
pub mod manifest;
pub mod ranking;
pub mod simulate;
#[doc(hidden)]
pub mod testing;
pub mod types;
pub mod verify;

// Re-exports for public API
pub use audit::{replay, AuditError, AuditLog, ReplayError};
pub use config::{ConfigError, RetrievalSettings, Settings};
pub use manifest::{CandidateManifest, ManifestEntry, ManifestError};
pub use ranking::{compare_entries, rank, RankError};
pub use simulate::{ScoreSource, SimulatedScores};
pub use types::{AuditRecord, Candidate, RankedEntry, RankedResult, RunContext, TierPolicy};
pub use verify::{InvariantError, VerifiedRanking};
