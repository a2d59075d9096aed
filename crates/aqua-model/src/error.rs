#![deny(unsafe_code)]

use std::path::PathBuf;

use crate::strategy::ImputeStrategy;

#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("input file not found: {path}")]
    DatasetNotFound { path: PathBuf },

    #[error("schema error: missing or unexpected column: {column}")]
    Schema { column: String },

    #[error("unsupported imputation strategy '{name}' (expected one of: {supported})", supported = ImputeStrategy::names().join(", "))]
    UnsupportedStrategy { name: String },

    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("pipeline stage applied before fitting")]
    NotFitted,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode pipeline: {message}")]
    Encode { message: String },

    #[error("failed to decode pipeline: {message}")]
    Decode { message: String },

    #[error("dataframe error: {message}")]
    Frame { message: String },
}

impl PrepError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn frame(message: impl std::fmt::Display) -> Self {
        Self::Frame {
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrepError>;
