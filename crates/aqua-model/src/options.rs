//! Configuration options for preprocessing runs.

use serde::{Deserialize, Serialize};

use crate::strategy::{ImputeStrategy, ScalingMode};

/// Options controlling how a dataset is preprocessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    /// Name of the label column, excluded from transformation and
    /// re-attached unchanged.
    pub label_column: String,

    /// Statistic used to fill missing feature values.
    pub strategy: ImputeStrategy,

    /// Fill value for [`ImputeStrategy::Constant`]; ignored otherwise.
    pub fill_value: f64,

    /// Whether to standardize features after imputation.
    pub scaling: ScalingMode,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            label_column: "Potability".to_string(),
            strategy: ImputeStrategy::default(),
            fill_value: 0.0,
            scaling: ScalingMode::default(),
        }
    }
}

impl PreprocessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label_column(mut self, label_column: impl Into<String>) -> Self {
        self.label_column = label_column.into();
        self
    }

    pub fn with_strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    pub fn with_scaling(mut self, scaling: ScalingMode) -> Self {
        self.scaling = scaling;
        self
    }
}
