//! File-backed run tracking for preprocessing.
//!
//! A run is a directory under the store holding a `run.json` record plus
//! copies of the artifacts logged into it. The store itself is plain
//! files, so runs can be inspected with nothing more than a shell.

pub mod config;
pub mod digest;
pub mod run;
pub mod tracker;

pub use config::{
    DEFAULT_EXPERIMENT, DEFAULT_STORE_DIR, STORE_ENV_VAR, TrackingConfig, default_store_dir,
};
pub use digest::sha256_hex;
pub use run::{ArtifactRecord, Run, RunStatus};
pub use tracker::{RunHandle, Tracker, with_run};
