//! Fitted transform pipeline: ordered stages plus the feature schema they
//! were fit on, serializable to a single binary artifact.

use std::path::Path;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use aqua_model::{PrepError, PreprocessOptions, Result, ScalingMode};

use crate::imputer::Imputer;
use crate::scaler::StandardScaler;

/// One fitted stage, applied in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FittedStage {
    Impute(Imputer),
    Scale(StandardScaler),
}

impl FittedStage {
    pub fn name(&self) -> &'static str {
        match self {
            FittedStage::Impute(_) => "impute",
            FittedStage::Scale(_) => "scale",
        }
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        match self {
            FittedStage::Impute(imputer) => imputer.transform(df),
            FittedStage::Scale(scaler) => scaler.transform(df),
        }
    }
}

/// An ordered, fitted sequence of transform stages.
///
/// Applying a fitted pipeline is deterministic and side-effect-free; a frame
/// whose feature columns differ from the fit-time schema is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipeline {
    feature_columns: Vec<String>,
    stages: Vec<FittedStage>,
}

impl FittedPipeline {
    /// Fits the configured stages on `features` and returns the pipeline
    /// together with the transformed frame. Stages fit sequentially: the
    /// scaler sees imputed data, as it will at apply time.
    pub fn fit_transform(
        features: &DataFrame,
        options: &PreprocessOptions,
    ) -> Result<(Self, DataFrame)> {
        let feature_columns: Vec<String> = features
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut stages = Vec::new();

        let mut imputer = Imputer::new(options.strategy, options.fill_value);
        let mut current = imputer.fit_transform(features)?;
        stages.push(FittedStage::Impute(imputer));

        if options.scaling == ScalingMode::Standard {
            let mut scaler = StandardScaler::new();
            current = scaler.fit_transform(&current)?;
            stages.push(FittedStage::Scale(scaler));
        }

        let pipeline = Self {
            feature_columns,
            stages,
        };
        debug!(
            stages = ?pipeline.stage_names(),
            features = pipeline.feature_columns.len(),
            "fitted pipeline"
        );
        Ok((pipeline, current))
    }

    /// Applies the fitted stages to a frame with the same feature schema.
    pub fn transform(&self, features: &DataFrame) -> Result<DataFrame> {
        self.check_schema(features)?;
        let mut current = features.clone();
        for stage in &self.stages {
            current = stage.transform(&current)?;
        }
        Ok(current)
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(FittedStage::name).collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| PrepError::Encode {
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| PrepError::Decode {
            message: e.to_string(),
        })
    }

    fn check_schema(&self, df: &DataFrame) -> Result<()> {
        let got: Vec<&str> = df
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        if got == self.feature_columns.iter().map(String::as_str).collect::<Vec<_>>() {
            return Ok(());
        }
        let column = self
            .feature_columns
            .iter()
            .find(|name| !got.contains(&name.as_str()))
            .cloned()
            .or_else(|| {
                got.into_iter()
                    .find(|name| !self.feature_columns.iter().any(|fc| fc == name))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| self.feature_columns.join(","));
        Err(PrepError::Schema { column })
    }
}

/// Reads a pipeline artifact previously written by the tool.
pub fn load_pipeline(path: &Path) -> Result<FittedPipeline> {
    if !path.exists() {
        return Err(PrepError::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| PrepError::read(path, e))?;
    let pipeline = FittedPipeline::from_bytes(&bytes)?;
    debug!(
        path = %path.display(),
        stages = ?pipeline.stage_names(),
        "loaded pipeline"
    );
    Ok(pipeline)
}
