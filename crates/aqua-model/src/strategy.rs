//! Imputation strategies and scaling modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrepError;

/// Statistic used to fill missing feature values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Arithmetic mean of the observed values.
    Mean,
    /// Median of the observed values (average of the middle two for even counts).
    #[default]
    Median,
    /// Most frequent observed value, ties broken toward the smallest.
    MostFrequent,
    /// A caller-supplied constant.
    Constant,
}

impl ImputeStrategy {
    pub const ALL: [ImputeStrategy; 4] = [
        ImputeStrategy::Mean,
        ImputeStrategy::Median,
        ImputeStrategy::MostFrequent,
        ImputeStrategy::Constant,
    ];

    /// Canonical names accepted on the command line and logged as `impute_method`.
    pub fn names() -> [&'static str; 4] {
        ["mean", "median", "most_frequent", "constant"]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImputeStrategy::Mean => "mean",
            ImputeStrategy::Median => "median",
            ImputeStrategy::MostFrequent => "most_frequent",
            ImputeStrategy::Constant => "constant",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ImputeStrategy::Mean => "fill with the column mean of observed values",
            ImputeStrategy::Median => "fill with the column median of observed values",
            ImputeStrategy::MostFrequent => {
                "fill with the most frequent observed value (smallest wins ties)"
            }
            ImputeStrategy::Constant => "fill with a fixed value (see --fill-value)",
        }
    }
}

impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImputeStrategy {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(ImputeStrategy::Mean),
            "median" => Ok(ImputeStrategy::Median),
            "most_frequent" | "most-frequent" => Ok(ImputeStrategy::MostFrequent),
            "constant" => Ok(ImputeStrategy::Constant),
            other => Err(PrepError::UnsupportedStrategy {
                name: other.to_string(),
            }),
        }
    }
}

/// Whether feature columns are standardized after imputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScalingMode {
    /// Leave imputed values as-is.
    #[default]
    Skip,
    /// Standardize each column to zero mean and unit variance.
    Standard,
}

impl ScalingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalingMode::Skip => "skip",
            ScalingMode::Standard => "standard",
        }
    }
}

impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
