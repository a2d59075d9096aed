//! Run records as they are persisted in the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Finished,
    Failed,
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Running => "running",
            RunStatus::Finished => "finished",
            RunStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file captured into the run directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Grouping under the run directory, e.g. `raw_data` or `cleaned_data`.
    pub category: String,
    /// File name of the stored copy inside the category directory.
    pub file_name: String,
    /// Hex-encoded SHA-256 of the stored bytes.
    pub sha256: String,
}

/// Everything recorded about a single run, serialized as `run.json`.
///
/// Params use a sorted map so the file is stable across runs with the
/// same inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub run_id: String,
    pub experiment: String,
    pub status: RunStatus,
    /// RFC 3339 UTC timestamp.
    pub started_at: String,
    /// RFC 3339 UTC timestamp, absent while the run is open.
    pub ended_at: Option<String>,
    pub params: BTreeMap<String, String>,
    pub artifacts: Vec<ArtifactRecord>,
}
