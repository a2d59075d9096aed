//! Opens, annotates, and seals runs in the file-backed store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use aqua_model::{PrepError, Result};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, info, warn};

use crate::config::TrackingConfig;
use crate::digest::sha256_hex;
use crate::run::{ArtifactRecord, Run, RunStatus};

const RUN_FILE: &str = "run.json";

/// Records runs under `<store_dir>/<experiment slug>/<run_id>/`.
#[derive(Debug, Clone)]
pub struct Tracker {
    config: TrackingConfig,
}

impl Tracker {
    pub fn new(config: TrackingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Creates the run directory and writes the initial `run.json`.
    pub fn open_run(&self) -> Result<RunHandle> {
        let run_id = next_run_id();
        let dir = self
            .config
            .store_dir
            .join(experiment_slug(&self.config.experiment))
            .join(&run_id);
        fs::create_dir_all(&dir).map_err(|source| PrepError::write(&dir, source))?;
        let handle = RunHandle {
            run: Run {
                run_id,
                experiment: self.config.experiment.clone(),
                status: RunStatus::Running,
                started_at: now_rfc3339(),
                ended_at: None,
                params: BTreeMap::new(),
                artifacts: Vec::new(),
            },
            dir,
        };
        handle.persist()?;
        info!(run_id = %handle.run.run_id, dir = %handle.dir.display(), "opened tracking run");
        Ok(handle)
    }
}

/// An open run plus the directory its files live in.
///
/// Every mutation is written back to `run.json` before returning, so the
/// record on disk never trails what the caller has logged.
#[derive(Debug)]
pub struct RunHandle {
    run: Run,
    dir: PathBuf,
}

impl RunHandle {
    pub fn id(&self) -> &str {
        &self.run.run_id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record(&self) -> &Run {
        &self.run
    }

    pub fn is_open(&self) -> bool {
        self.run.status == RunStatus::Running
    }

    pub fn log_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.run.params.insert(key.into(), value.into());
        self.persist()
    }

    pub fn log_params<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.run.params.insert(key.into(), value.into());
        }
        self.persist()
    }

    /// Copies the file at `path` into the run directory under `category`
    /// and records its digest.
    pub fn log_artifact(&mut self, path: &Path, category: &str) -> Result<()> {
        let bytes = fs::read(path).map_err(|source| PrepError::read(path, source))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "artifact".to_string());
        let category_dir = self.dir.join(category);
        fs::create_dir_all(&category_dir)
            .map_err(|source| PrepError::write(&category_dir, source))?;
        let stored = category_dir.join(&file_name);
        fs::write(&stored, &bytes).map_err(|source| PrepError::write(&stored, source))?;
        debug!(
            run_id = %self.run.run_id,
            category,
            file = %stored.display(),
            "captured artifact"
        );
        self.run.artifacts.push(ArtifactRecord {
            category: category.to_string(),
            file_name,
            sha256: sha256_hex(&bytes),
        });
        self.persist()
    }

    /// Seals the run with its final status and end timestamp.
    pub fn close(&mut self, status: RunStatus) -> Result<()> {
        self.run.status = status;
        self.run.ended_at = Some(now_rfc3339());
        self.persist()?;
        info!(run_id = %self.run.run_id, status = %status, "closed tracking run");
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let path = self.dir.join(RUN_FILE);
        let bytes = serde_json::to_vec_pretty(&self.run)
            .map_err(|source| PrepError::write(&path, std::io::Error::other(source)))?;
        fs::write(&path, bytes).map_err(|source| PrepError::write(&path, source))
    }
}

/// Runs `f` inside a run scope.
///
/// When `existing` is supplied the closure logs into that run and its
/// lifecycle stays with the caller. Otherwise a run is opened here and
/// closed on every exit path: `Finished` when `f` succeeds, `Failed`
/// when it errors.
pub fn with_run<T, F>(tracker: &Tracker, existing: Option<&mut RunHandle>, f: F) -> Result<T>
where
    F: FnOnce(&mut RunHandle) -> Result<T>,
{
    if let Some(run) = existing {
        return f(run);
    }
    let mut run = tracker.open_run()?;
    match f(&mut run) {
        Ok(value) => {
            run.close(RunStatus::Finished)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(close_err) = run.close(RunStatus::Failed) {
                warn!(run_id = %run.id(), error = %close_err, "could not seal failed run");
            }
            Err(err)
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

static RUN_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Millisecond timestamp plus a process-local counter, so runs opened
/// in the same millisecond still get distinct ids.
fn next_run_id() -> String {
    let seq = RUN_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("run_{}_{seq:03}", Utc::now().format("%Y%m%dT%H%M%S%3fZ"))
}

/// Directory-safe form of the experiment name.
fn experiment_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "experiment".to_string()
    } else {
        slug.to_string()
    }
}
