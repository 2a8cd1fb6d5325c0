//! Configuration layering: defaults, then a YAML file, then `CONTOUR_*`
//! environment variables, then command-line flags.

use std::path::Path;

use contour_common::ContourResult;
use marching_squares::PipelineConfig;

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub workers: Option<usize>,
    pub step_x: Option<usize>,
    pub step_y: Option<usize>,
    pub sigma: Option<i32>,
    pub target_width: Option<usize>,
    pub target_height: Option<usize>,
}

impl ConfigOverrides {
    /// Apply every value that was given.
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(step_x) = self.step_x {
            config.step_x = step_x;
        }
        if let Some(step_y) = self.step_y {
            config.step_y = step_y;
        }
        if let Some(sigma) = self.sigma {
            config.sigma = sigma;
        }
        if let Some(width) = self.target_width {
            config.target_width = width;
        }
        if let Some(height) = self.target_height {
            config.target_height = height;
        }
        config
    }
}

/// Defaults, or the YAML file at `path` when one is given.
pub fn load_base_config(path: Option<&Path>) -> ContourResult<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_yaml_file(path),
        None => Ok(PipelineConfig::default()),
    }
}
