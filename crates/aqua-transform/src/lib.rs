pub mod imputer;
pub mod pipeline;
pub mod preprocess;
pub mod scaler;

pub use imputer::Imputer;
pub use pipeline::{FittedPipeline, FittedStage, load_pipeline};
pub use preprocess::{PreprocessOutcome, apply_pipeline, preprocess};
pub use scaler::{ScalerParams, StandardScaler};
