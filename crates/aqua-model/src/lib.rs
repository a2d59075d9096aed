pub mod error;
pub mod options;
pub mod strategy;

pub use error::{PrepError, Result};
pub use options::PreprocessOptions;
pub use strategy::{ImputeStrategy, ScalingMode};
