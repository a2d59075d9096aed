//! Entry point: split label from features, fit and apply the configured
//! pipeline, reassemble the frame in its original column order.

use polars::prelude::*;
use tracing::{debug, info};

use aqua_ingest::{MissingReport, missing_report};
use aqua_model::{PrepError, PreprocessOptions, Result};

use crate::pipeline::FittedPipeline;

/// What `preprocess` produced. `pipeline` is `None` when the input had no
/// missing values and passed through unchanged; callers must check before
/// persisting a pipeline artifact.
#[derive(Debug, Clone)]
pub struct PreprocessOutcome {
    pub cleaned: DataFrame,
    pub pipeline: Option<FittedPipeline>,
    pub missing: MissingReport,
}

/// Cleans a raw dataset per the configured options.
///
/// The label column is excluded from fitting and re-attached unchanged, in
/// its original column position and row order. Fails before touching any
/// data if the label column is absent or the dataset has no rows. Performs
/// no filesystem writes; persistence is the caller's job.
pub fn preprocess(df: &DataFrame, options: &PreprocessOptions) -> Result<PreprocessOutcome> {
    if df.height() == 0 {
        return Err(PrepError::EmptyDataset);
    }
    let label_index = df
        .get_column_names()
        .iter()
        .position(|name| name.as_str() == options.label_column)
        .ok_or_else(|| PrepError::Schema {
            column: options.label_column.clone(),
        })?;

    let missing = missing_report(df);
    if !missing.has_missing() {
        info!("no missing values detected; dataset passes through unchanged");
        return Ok(PreprocessOutcome {
            cleaned: df.clone(),
            pipeline: None,
            missing,
        });
    }
    debug!(
        cells = missing.total_missing(),
        columns = missing.affected().count(),
        "missing values detected"
    );

    let label = df
        .column(options.label_column.as_str())
        .map_err(PrepError::frame)?
        .clone();
    let features = df
        .drop(options.label_column.as_str())
        .map_err(PrepError::frame)?;

    let (pipeline, transformed) = FittedPipeline::fit_transform(&features, options)?;

    let mut columns = transformed.get_columns().to_vec();
    columns.insert(label_index, label);
    let cleaned = DataFrame::new(columns).map_err(PrepError::frame)?;

    Ok(PreprocessOutcome {
        cleaned,
        pipeline: Some(pipeline),
        missing,
    })
}

/// Transforms another dataset with an already-fitted pipeline.
///
/// When `label_column` is present it is carried through untouched, same as
/// during fitting; a dataset without it is treated as feature-only. The
/// feature schema must match what the pipeline was fitted on.
pub fn apply_pipeline(
    df: &DataFrame,
    pipeline: &FittedPipeline,
    label_column: &str,
) -> Result<DataFrame> {
    if df.height() == 0 {
        return Err(PrepError::EmptyDataset);
    }
    let Some(label_index) = df
        .get_column_names()
        .iter()
        .position(|name| name.as_str() == label_column)
    else {
        return pipeline.transform(df);
    };
    let label = df.column(label_column).map_err(PrepError::frame)?.clone();
    let features = df.drop(label_column).map_err(PrepError::frame)?;
    let transformed = pipeline.transform(&features)?;
    let mut columns = transformed.get_columns().to_vec();
    columns.insert(label_index, label);
    DataFrame::new(columns).map_err(PrepError::frame)
}
