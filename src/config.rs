//! Run settings: tier multipliers plus run parameters, loaded from JSON.
//!
//! The loader validates nothing beyond parsing. Semantic checks (multiplier
//! range, tier existence) belong to the ranking engine, which validates its
//! inputs regardless of upstream guarantees.

use crate::types::TierPolicy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Top-level settings file shape (`config/settings.json`).
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub retrieval: RetrievalSettings,
}

/// The `retrieval` section: everything one ranking run needs.
#[derive(Deserialize, Clone, Debug)]
pub struct RetrievalSettings {
    pub seed: u64,
    pub top_k: usize,
    pub tier_multipliers: BTreeMap<String, f64>,
    /// Defaults to the invoking user when absent.
    #[serde(default)]
    pub requester: Option<String>,
    /// Free-text rationale recorded in the audit log.
    #[serde(default)]
    pub reason: Option<String>,
}

impl Settings {
    /// Load and parse a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Snapshot the tier multipliers as an immutable policy value.
    pub fn policy(&self) -> TierPolicy {
        TierPolicy::new(self.retrieval.tier_multipliers.clone())
    }
}

/// Error type for settings loading.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "could not read settings {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "could not parse settings {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}
