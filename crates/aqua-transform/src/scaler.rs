//! Standardization of feature columns to zero mean and unit variance.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use aqua_model::{PrepError, Result};

/// Fitted parameters for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerParams {
    pub center: f64,
    pub scale: f64,
}

/// Standard scaler: maps x to `(x - mean) / std` per column.
///
/// The standard deviation is the population one (ddof 0). A constant column
/// gets scale 1.0 so it maps to zeros instead of NaN.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    params: BTreeMap<String, ScalerParams>,
    is_fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, df: &DataFrame) -> Result<()> {
        for column in df.get_columns() {
            let series = column
                .as_materialized_series()
                .cast(&DataType::Float64)
                .map_err(PrepError::frame)?;
            let ca = series.f64().map_err(PrepError::frame)?;
            let mean = ca.mean().unwrap_or(0.0);
            let std = ca.std(0).unwrap_or(1.0);
            self.params.insert(
                column.name().to_string(),
                ScalerParams {
                    center: mean,
                    scale: if std == 0.0 { 1.0 } else { std },
                },
            );
        }
        self.is_fitted = true;
        debug!(columns = self.params.len(), "fitted standard scaler");
        Ok(())
    }

    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }
        let mut result = df.clone();
        for (name, params) in &self.params {
            let column = df
                .column(name.as_str())
                .map_err(|_| PrepError::Schema {
                    column: name.clone(),
                })?;
            let series = column
                .as_materialized_series()
                .cast(&DataType::Float64)
                .map_err(PrepError::frame)?;
            let ca = series.f64().map_err(PrepError::frame)?;
            let scaled: Float64Chunked = ca
                .into_iter()
                .map(|value| value.map(|v| (v - params.center) / params.scale))
                .collect();
            let scaled = scaled.with_name(series.name().clone());
            result
                .with_column(scaled.into_series())
                .map_err(PrepError::frame)?;
        }
        Ok(result)
    }

    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    pub fn params(&self) -> &BTreeMap<String, ScalerParams> {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardized_column_has_zero_mean_and_unit_variance() {
        let df = DataFrame::new(vec![
            Series::new("ph".into(), vec![2.0, 4.0, 6.0, 8.0]).into_column(),
        ])
        .expect("frame");
        let mut scaler = StandardScaler::new();
        let result = scaler.fit_transform(&df).expect("fit_transform");
        let ca = result.column("ph").unwrap().as_materialized_series().f64().unwrap();
        let values: Vec<f64> = ca.into_iter().flatten().collect();

        let mean: f64 = values.iter().sum::<f64>() / values.len() as f64;
        assert!(mean.abs() < 1e-12);
        let var: f64 = values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64;
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uses_population_standard_deviation() {
        let df = DataFrame::new(vec![
            Series::new("ph".into(), vec![1.0, 3.0]).into_column(),
        ])
        .expect("frame");
        let mut scaler = StandardScaler::new();
        scaler.fit(&df).expect("fit");
        let params = &scaler.params()["ph"];
        assert_eq!(params.center, 2.0);
        assert_eq!(params.scale, 1.0);
    }

    #[test]
    fn constant_column_maps_to_zeros() {
        let df = DataFrame::new(vec![
            Series::new("ph".into(), vec![5.0, 5.0, 5.0]).into_column(),
        ])
        .expect("frame");
        let mut scaler = StandardScaler::new();
        let result = scaler.fit_transform(&df).expect("fit_transform");
        let ca = result.column("ph").unwrap().as_materialized_series().f64().unwrap();
        for value in ca.into_iter().flatten() {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn transform_before_fit_is_rejected() {
        let df = DataFrame::new(vec![
            Series::new("ph".into(), vec![1.0]).into_column(),
        ])
        .expect("frame");
        let scaler = StandardScaler::new();
        assert!(matches!(
            scaler.transform(&df).unwrap_err(),
            PrepError::NotFitted
        ));
    }
}
