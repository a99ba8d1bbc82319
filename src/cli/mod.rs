// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the riswis command-line interface.
//!
//! Three subcommands: `rank` to run a ranking and append an audit record,
//! `inspect` to examine an audit log, and `replay` to re-run recorded
//! entries through the engine and confirm they reproduce exactly.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "riswis",
    about = "Deterministic, auditable retrieval ranking",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a candidate manifest under a tier policy and audit the run
    Rank {
        /// Settings file with tier multipliers and run parameters
        #[arg(short, long, default_value = "config/settings.json")]
        config: String,

        /// Candidate manifest listing {id, tier, raw_score} per document
        #[arg(short, long, default_value = "data/manifest.json")]
        manifest: String,

        /// Override the configured top-K ceiling
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Override the configured seed
        ///
        /// Scores missing from the manifest are simulated from this seed;
        /// the ranking order itself never depends on it.
        #[arg(long)]
        seed: Option<u64>,

        /// Who is running this ranking (defaults to config, then $USER)
        #[arg(long)]
        requester: Option<String>,

        /// Why this ranking is being run (recorded verbatim in the audit log)
        #[arg(long)]
        reason: Option<String>,

        /// Audit log to append the run record to
        #[arg(long, default_value = "logs/riswis_audit.jsonl")]
        log: String,

        /// Skip the audit record (the ranking is still printed)
        #[arg(long)]
        no_audit: bool,
    },

    /// Inspect an audit log: list records and verify their integrity
    Inspect {
        /// Path to the audit log (JSONL)
        file: String,
    },

    /// Replay audit records through the engine and verify reproduction
    Replay {
        /// Path to the audit log (JSONL)
        file: String,

        /// Replay only the record at this 0-based index
        #[arg(long)]
        entry: Option<usize>,
    },
}
