//! Store location and experiment naming for run tracking.

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the run store location.
pub const STORE_ENV_VAR: &str = "AQUAPREP_STORE_DIR";

/// Directory used when no store location is configured.
pub const DEFAULT_STORE_DIR: &str = "aquaprep_runs";

/// Experiment name used when the caller does not supply one.
pub const DEFAULT_EXPERIMENT: &str = "Water Potability Preprocessing";

/// Where runs are recorded and under which experiment they are grouped.
///
/// The tracker takes this as an explicit value; nothing is read from
/// process-wide state after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingConfig {
    pub store_dir: PathBuf,
    pub experiment: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            experiment: DEFAULT_EXPERIMENT.to_string(),
        }
    }
}

impl TrackingConfig {
    pub fn new(store_dir: impl Into<PathBuf>, experiment: impl Into<String>) -> Self {
        Self {
            store_dir: store_dir.into(),
            experiment: experiment.into(),
        }
    }

    pub fn with_store_dir(mut self, store_dir: impl Into<PathBuf>) -> Self {
        self.store_dir = store_dir.into();
        self
    }

    pub fn with_experiment(mut self, experiment: impl Into<String>) -> Self {
        self.experiment = experiment.into();
        self
    }
}

/// Resolves the run store directory.
///
/// Resolution order:
/// 1. `AQUAPREP_STORE_DIR` environment variable.
/// 2. `aquaprep_runs` relative to the working directory.
pub fn default_store_dir() -> PathBuf {
    if let Ok(dir) = env::var(STORE_ENV_VAR) {
        return PathBuf::from(dir);
    }
    PathBuf::from(DEFAULT_STORE_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_conventional_store() {
        let config = TrackingConfig::default();
        assert_eq!(config.experiment, DEFAULT_EXPERIMENT);
    }

    #[test]
    fn builders_override_fields() {
        let config = TrackingConfig::default()
            .with_store_dir("/tmp/runs")
            .with_experiment("smoke test");
        assert_eq!(config.store_dir, PathBuf::from("/tmp/runs"));
        assert_eq!(config.experiment, "smoke test");
    }
}
