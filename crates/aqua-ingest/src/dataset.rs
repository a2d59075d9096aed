#![deny(unsafe_code)]

use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use aqua_model::{PrepError, Result};

/// Loads a CSV dataset with a header row into a [`DataFrame`].
///
/// Float columns have `NaN` replaced by null during loading so that a single
/// representation of "missing" reaches the rest of the pipeline.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(PrepError::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(PrepError::frame)?
        .finish()
        .map_err(PrepError::frame)?;

    normalize_missing(&mut df)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded dataset"
    );
    Ok(df)
}

/// Rewrites `NaN` cells in float columns as nulls, in place.
fn normalize_missing(df: &mut DataFrame) -> Result<()> {
    let names = df.get_column_names_owned();
    for name in names {
        let column = df.column(name.as_str()).map_err(PrepError::frame)?;
        if !matches!(column.dtype(), DataType::Float32 | DataType::Float64) {
            continue;
        }
        let series = column
            .as_materialized_series()
            .cast(&DataType::Float64)
            .map_err(PrepError::frame)?;
        let ca = series.f64().map_err(PrepError::frame)?;
        if !ca.into_iter().flatten().any(f64::is_nan) {
            continue;
        }
        let values: Vec<Option<f64>> = ca
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect();
        df.with_column(Series::new(name.clone(), values))
            .map_err(PrepError::frame)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn missing_dataset_is_reported_before_reading() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.csv");
        let err = load_dataset(&path).unwrap_err();
        match err {
            PrepError::DatasetNotFound { path: reported } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_cells_load_as_nulls() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_csv(&dir, "data.csv", "ph,Potability\n7.0,1\n,0\n");
        let df = load_dataset(&path).expect("load");
        assert_eq!(df.height(), 2);
        let ph = df.column("ph").expect("ph column");
        assert_eq!(ph.null_count(), 1);
    }

    #[test]
    fn nan_cells_become_nulls() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_csv(&dir, "data.csv", "ph,Potability\nNaN,1\n6.5,0\n");
        let df = load_dataset(&path).expect("load");
        let ph = df.column("ph").expect("ph column");
        assert_eq!(ph.null_count(), 1);
    }
}
