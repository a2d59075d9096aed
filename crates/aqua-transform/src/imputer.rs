//! Missing-value imputation over numeric feature columns.
//!
//! Nulls are the single representation of "missing" here; `NaN` cells are
//! normalized to null when the dataset is loaded.

use std::collections::BTreeMap;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use aqua_model::{ImputeStrategy, PrepError, Result};

/// Per-column fill values computed from observed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    constant: f64,
    fill_values: BTreeMap<String, f64>,
    is_fitted: bool,
}

impl Imputer {
    pub fn new(strategy: ImputeStrategy, constant: f64) -> Self {
        Self {
            strategy,
            constant,
            fill_values: BTreeMap::new(),
            is_fitted: false,
        }
    }

    /// Computes the fill statistic for every column of `df` over observed
    /// (non-null) values. A column with no observed values falls back to 0.0
    /// for the statistic strategies.
    pub fn fit(&mut self, df: &DataFrame) -> Result<()> {
        for column in df.get_columns() {
            let series = column
                .as_materialized_series()
                .cast(&DataType::Float64)
                .map_err(PrepError::frame)?;
            let ca = series.f64().map_err(PrepError::frame)?;
            let fill = self.fill_statistic(ca);
            self.fill_values.insert(column.name().to_string(), fill);
        }
        self.is_fitted = true;
        debug!(
            strategy = %self.strategy,
            columns = self.fill_values.len(),
            "fitted imputer"
        );
        Ok(())
    }

    /// Replaces nulls with the fitted fill value. Observed cells pass through
    /// untouched; every imputed column comes out as `Float64`.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }
        let mut result = df.clone();
        for (name, fill) in &self.fill_values {
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
            let filled: Float64Chunked = ca
                .into_iter()
                .map(|value| Some(value.unwrap_or(*fill)))
                .collect();
            let filled = filled.with_name(series.name().clone());
            result
                .with_column(filled.into_series())
                .map_err(PrepError::frame)?;
        }
        Ok(result)
    }

    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    pub fn fill_values(&self) -> &BTreeMap<String, f64> {
        &self.fill_values
    }

    fn fill_statistic(&self, ca: &Float64Chunked) -> f64 {
        match self.strategy {
            ImputeStrategy::Mean => ca.mean().unwrap_or(0.0),
            ImputeStrategy::Median => ca.median().unwrap_or(0.0),
            ImputeStrategy::MostFrequent => {
                let mut observed: Vec<f64> = ca.into_iter().flatten().collect();
                if observed.is_empty() {
                    0.0
                } else {
                    most_frequent(&mut observed)
                }
            }
            ImputeStrategy::Constant => self.constant,
        }
    }
}

/// Most frequent value among `values`; ties break toward the smallest value
/// so fitted pipelines are reproducible.
fn most_frequent(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut best = values[0];
    let mut best_count = 0usize;
    let mut idx = 0;
    while idx < values.len() {
        let current = values[idx];
        let mut count = 0usize;
        while idx < values.len() && values[idx] == current {
            count += 1;
            idx += 1;
        }
        if count > best_count {
            best = current;
            best_count = count;
        }
    }
    best
}
