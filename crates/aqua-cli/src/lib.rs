//! CLI library components for the water potability preprocessor.

pub mod logging;
pub mod pipeline;
