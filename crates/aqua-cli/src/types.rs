use std::path::PathBuf;

/// What a `run` invocation did, for the post-run summary.
#[derive(Debug)]
pub struct RunReport {
    pub dataset: PathBuf,
    pub dataset_version: String,
    pub rows: usize,
    pub feature_count: usize,
    pub missing_cells: usize,
    pub imputed_columns: Vec<String>,
    pub strategy: String,
    pub scaled: bool,
    pub output_path: PathBuf,
    pub pipeline_path: PathBuf,
    pub wrote_output: bool,
    pub wrote_pipeline: bool,
    pub run_id: Option<String>,
    pub dry_run: bool,
}

/// What an `apply` invocation did.
#[derive(Debug)]
pub struct ApplyReport {
    pub pipeline: PathBuf,
    pub dataset: PathBuf,
    pub output_path: PathBuf,
    pub rows: usize,
    pub stages: Vec<String>,
}
