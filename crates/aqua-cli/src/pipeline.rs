//! Preprocessing pipeline glue with explicit stages.
//!
//! The `run` subcommand drives these stages in order:
//! 1. **Load**: read the raw CSV and normalize missing markers
//! 2. **Preprocess**: detect missing values, fit and apply the pipeline
//! 3. **Persist**: write the cleaned CSV and pipeline blob atomically
//! 4. **Track**: record params and artifacts against a run
//!
//! Loading and preprocessing live in the library crates; this module holds
//! the persistence and tracking glue shared by the subcommands and the
//! integration tests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use aqua_ingest::{write_bytes_atomic, write_csv_atomic};
use aqua_track::{RunHandle, Tracker, with_run};
use aqua_transform::PreprocessOutcome;

// ============================================================================
// Stage 3: Persist
// ============================================================================

/// Artifacts written by the persist stage.
#[derive(Debug)]
pub struct PersistResult {
    /// Where the cleaned CSV landed.
    pub cleaned_path: PathBuf,
    /// Where the pipeline blob landed, absent when nothing was fitted.
    pub pipeline_path: Option<PathBuf>,
}

/// Write the cleaned CSV and, when one was fitted, the pipeline blob.
///
/// Each write is atomic. The pipeline goes first: a failure between the two
/// writes must not leave a fresh cleaned CSV beside a stale pipeline.
pub fn persist(
    outcome: &PreprocessOutcome,
    cleaned_path: &Path,
    pipeline_path: &Path,
) -> Result<PersistResult> {
    let written_pipeline = match &outcome.pipeline {
        Some(pipeline) => {
            let bytes = pipeline.to_bytes()?;
            write_bytes_atomic(&bytes, pipeline_path)?;
            info!(path = %pipeline_path.display(), "wrote fitted pipeline");
            Some(pipeline_path.to_path_buf())
        }
        None => {
            warn!(
                path = %pipeline_path.display(),
                "no missing values detected, skipping pipeline artifact"
            );
            None
        }
    };
    write_csv_atomic(&outcome.cleaned, cleaned_path)?;
    info!(
        path = %cleaned_path.display(),
        rows = outcome.cleaned.height(),
        "wrote cleaned dataset"
    );
    Ok(PersistResult {
        cleaned_path: cleaned_path.to_path_buf(),
        pipeline_path: written_pipeline,
    })
}

// ============================================================================
// Stage 4: Track
// ============================================================================

/// Everything recorded against a tracking run.
#[derive(Debug)]
pub struct TrackInput<'a> {
    pub dataset: &'a Path,
    pub dataset_version: &'a str,
    pub impute_method: &'a str,
    pub cleaned_path: &'a Path,
    /// Absent when the run produced no pipeline artifact.
    pub pipeline_path: Option<&'a Path>,
}

/// Parameters logged for a run, in stable order.
pub fn run_params(input: &TrackInput<'_>) -> Vec<(String, String)> {
    vec![
        ("dataset_path".to_string(), input.dataset.display().to_string()),
        ("dataset_version".to_string(), input.dataset_version.to_string()),
        ("impute_method".to_string(), input.impute_method.to_string()),
    ]
}

/// Record params and artifacts, opening a run when none is supplied.
///
/// A run opened here is closed on every exit path; a caller-supplied run is
/// logged into and left open. Returns the run id.
pub fn track(
    tracker: &Tracker,
    existing: Option<&mut RunHandle>,
    input: &TrackInput<'_>,
) -> Result<String> {
    let run_id = with_run(tracker, existing, |run| {
        run.log_params(run_params(input))?;
        run.log_artifact(input.dataset, "raw_data")?;
        if let Some(path) = input.pipeline_path {
            run.log_artifact(path, "preprocessor")?;
        }
        run.log_artifact(input.cleaned_path, "cleaned_data")?;
        Ok(run.id().to_string())
    })
    .context("record tracking run")?;
    Ok(run_id)
}
