//! CLI argument definitions for the water potability preprocessor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aquaprep",
    version,
    about = "Water potability preprocessing - impute, scale, and track datasets",
    long_about = "Prepare the water potability dataset for model training.\n\n\
                  Detects missing feature values, fits an imputation (and optional\n\
                  standard scaling) pipeline, and writes the cleaned CSV plus the\n\
                  fitted pipeline for later reuse on new data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean the raw dataset and persist the fitted pipeline.
    Run(RunArgs),

    /// Apply a saved pipeline to another dataset with the same features.
    Apply(ApplyArgs),

    /// List supported imputation strategies.
    Strategies,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the raw dataset CSV.
    #[arg(
        long = "dataset",
        value_name = "PATH",
        default_value = "water_potability_raw.csv"
    )]
    pub dataset: PathBuf,

    /// Name of the label column, carried through untouched.
    #[arg(long = "label-column", value_name = "NAME", default_value = "Potability")]
    pub label_column: String,

    /// Imputation strategy (mean, median, most_frequent, constant).
    #[arg(long = "impute-method", value_name = "NAME", default_value = "median")]
    pub impute_method: String,

    /// Fill value used by the constant strategy.
    #[arg(long = "fill-value", value_name = "VALUE", default_value_t = 0.0)]
    pub fill_value: f64,

    /// Standard-scale features after imputation.
    #[arg(long = "scale")]
    pub scale: bool,

    /// Where the cleaned CSV is written.
    #[arg(
        long = "output-path",
        value_name = "PATH",
        default_value = "preprocessing/water_potability_preprocessing.csv"
    )]
    pub output_path: PathBuf,

    /// Where the fitted pipeline is written.
    #[arg(
        long = "pipeline-path",
        value_name = "PATH",
        default_value = "preprocessing/preprocessor.bin"
    )]
    pub pipeline_path: PathBuf,

    /// Dataset version recorded with the tracking run.
    #[arg(long = "dataset-version", value_name = "VERSION", default_value = "v1.0")]
    pub dataset_version: String,

    /// Skip run tracking entirely.
    #[arg(long = "no-track")]
    pub no_track: bool,

    /// Run store directory (default: aquaprep_runs, or AQUAPREP_STORE_DIR).
    #[arg(long = "store-dir", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Experiment name that runs are grouped under.
    #[arg(long = "experiment", value_name = "NAME")]
    pub experiment: Option<String>,

    /// Report what would be written without writing or tracking anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ApplyArgs {
    /// Path to the saved pipeline.
    #[arg(
        long = "pipeline",
        value_name = "PATH",
        default_value = "preprocessing/preprocessor.bin"
    )]
    pub pipeline: PathBuf,

    /// Path to the dataset CSV to transform.
    #[arg(long = "dataset", value_name = "PATH")]
    pub dataset: PathBuf,

    /// Label column to carry through when present.
    #[arg(long = "label-column", value_name = "NAME", default_value = "Potability")]
    pub label_column: String,

    /// Where the transformed CSV is written.
    #[arg(long = "output-path", value_name = "PATH")]
    pub output_path: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
