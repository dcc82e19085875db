//! Baseline snapshot persistence.
//!
//! Exactly one baseline exists at a time. `save` replaces it wholesale:
//! the new document is written to a temp file in the same directory and
//! renamed over the old one, so a concurrent reader sees either the previous
//! baseline or the new one, never a partial write.

use std::path::{Path, PathBuf};

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregate::{OperationSummary, RunSummary, ToolSummary};
use crate::error::{BenchError, BenchResult};
use crate::io::{read_optional_json, write_atomic};
use crate::record::UNKNOWN;

/// A saved aggregation used as the comparison reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// When this baseline was created (RFC 3339).
    #[serde(default)]
    pub created_at: String,

    /// Result file the baseline was aggregated from.
    #[serde(default = "unknown_source")]
    pub source_file: String,

    pub operations: IndexMap<String, OperationSummary>,

    #[serde(default)]
    pub tools: IndexMap<String, ToolSummary>,
}

fn unknown_source() -> String {
    UNKNOWN.to_string()
}

impl Baseline {
    /// Wrap a summary with provenance, stamped with the current time.
    pub fn from_summary(summary: &RunSummary, source_file: impl Into<String>) -> Self {
        Self {
            created_at: Utc::now().to_rfc3339(),
            source_file: source_file.into(),
            operations: summary.operations.clone(),
            tools: summary.tools.clone(),
        }
    }
}

/// The single persisted baseline at a well-known path.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current baseline.
    ///
    /// Any failure (missing file, unreadable, malformed) yields `None`:
    /// having no baseline is the normal first-run state.
    pub fn load(&self) -> Option<Baseline> {
        read_optional_json(&self.path, "baseline")
    }

    /// Replace the baseline with `summary`, recording `source_file` as its
    /// provenance.
    pub fn save(&self, summary: &RunSummary, source_file: &str) -> BenchResult<Baseline> {
        let baseline = Baseline::from_summary(summary, source_file);
        let content = serde_json::to_string_pretty(&baseline)
            .map_err(|e| BenchError::io(&self.path, format!("failed to serialize baseline: {}", e)))?;

        write_atomic(&self.path, content.as_bytes())?;
        info!(path = %self.path.display(), source = source_file, "baseline saved");
        Ok(baseline)
    }
}
