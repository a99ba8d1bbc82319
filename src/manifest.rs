//! Candidate manifest: the per-query feed of `{id, tier, raw_score}` triples.
//!
//! The engine treats this as an opaque external source. No score-range or
//! tier validation happens here - `rank` re-checks everything, so a
//! manifest that lies about its scores still fails loudly at the boundary
//! of the engine rather than deep inside scoring.
//!
//! Entries may omit `raw_score`, in which case a `ScoreSource` (normally
//! the seeded simulator) supplies one.

use crate::simulate::ScoreSource;
use crate::types::Candidate;
use serde::Deserialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Clone, Debug)]
pub struct CandidateManifest {
    pub version: u32,
    pub candidates: Vec<ManifestEntry>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ManifestEntry {
    pub id: String,
    pub tier: String,
    #[serde(default)]
    pub raw_score: Option<f64>,
}

impl CandidateManifest {
    /// Load and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// All candidate ids, in manifest order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|entry| entry.id.as_str())
    }

    /// Materialize candidates, filling missing scores from `scores`.
    pub fn into_candidates<S: ScoreSource>(
        self,
        scores: &S,
    ) -> Result<Vec<Candidate>, ManifestError> {
        self.candidates
            .into_iter()
            .map(|entry| {
                let raw_score = match entry.raw_score {
                    Some(score) => score,
                    None => scores
                        .score_for(&entry.id)
                        .ok_or(ManifestError::MissingScore {
                            id: entry.id.clone(),
                        })?,
                };
                Ok(Candidate {
                    id: entry.id,
                    raw_score,
                    tier: entry.tier,
                })
            })
            .collect()
    }
}

/// Error type for manifest loading.
#[derive(Debug)]
pub enum ManifestError {
    Io { path: PathBuf, source: io::Error },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// An entry had no `raw_score` and the score source had none for it.
    MissingScore { id: String },
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io { path, source } => {
                write!(f, "could not read manifest {}: {}", path.display(), source)
            }
            ManifestError::Parse { path, source } => {
                write!(f, "could not parse manifest {}: {}", path.display(), source)
            }
            ManifestError::MissingScore { id } => {
                write!(f, "no raw_score for candidate '{}' and none simulated", id)
            }
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestError::Io { source, .. } => Some(source),
            ManifestError::Parse { source, .. } => Some(source),
            ManifestError::MissingScore { .. } => None,
        }
    }
}
