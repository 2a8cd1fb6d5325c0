//! Configuration for the contour pipeline.

use std::path::Path;

use contour_common::{ContourError, ContourResult};
use serde::{Deserialize, Serialize};

/// Default lattice step in pixels (both axes).
pub const DEFAULT_STEP: usize = 8;
/// Default luminance threshold: cells at or below it are "inside".
pub const DEFAULT_SIGMA: i32 = 200;
/// Default working resolution.
pub const DEFAULT_TARGET_WIDTH: usize = 2048;
pub const DEFAULT_TARGET_HEIGHT: usize = 2048;

/// Parameters of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Size of the worker pool.
    pub workers: usize,

    /// Horizontal lattice step (glyph width) in pixels.
    pub step_x: usize,

    /// Vertical lattice step (glyph height) in pixels.
    pub step_y: usize,

    /// Luminance threshold. Signed so that -1 means "no pixel qualifies".
    pub sigma: i32,

    /// Working resolution; larger sources are resampled down to it.
    pub target_width: usize,
    pub target_height: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            step_x: DEFAULT_STEP,
            step_y: DEFAULT_STEP,
            sigma: DEFAULT_SIGMA,
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl PipelineConfig {
    /// Apply `CONTOUR_*` environment variables.
    ///
    /// Unset or empty variables leave the current value; anything else that
    /// does not parse is a [`ContourError::InvalidConfig`].
    pub fn with_env_overrides(self) -> ContourResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `CONTOUR_*` overrides read through `lookup`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> ContourResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parsed = |key: &str| -> ContourResult<Option<i64>> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => value
                    .trim()
                    .parse::<i64>()
                    .map(Some)
                    .map_err(|e| ContourError::invalid_config(format!("{}={:?}: {}", key, value, e))),
                _ => Ok(None),
            }
        };
        let count = |key: &str| -> ContourResult<Option<usize>> {
            match parsed(key)? {
                Some(v) => usize::try_from(v).map(Some).map_err(|_| {
                    ContourError::invalid_config(format!("{}={}: must not be negative", key, v))
                }),
                None => Ok(None),
            }
        };

        if let Some(workers) = count("CONTOUR_WORKERS")? {
            self.workers = workers;
        }
        if let Some(step) = count("CONTOUR_STEP_X")? {
            self.step_x = step;
        }
        if let Some(step) = count("CONTOUR_STEP_Y")? {
            self.step_y = step;
        }
        if let Some(sigma) = parsed("CONTOUR_SIGMA")? {
            self.sigma = i32::try_from(sigma).map_err(|_| {
                ContourError::invalid_config(format!("CONTOUR_SIGMA={}: out of range", sigma))
            })?;
        }
        if let Some(width) = count("CONTOUR_TARGET_WIDTH")? {
            self.target_width = width;
        }
        if let Some(height) = count("CONTOUR_TARGET_HEIGHT")? {
            self.target_height = height;
        }

        Ok(self)
    }

    /// Parse a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> ContourResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML configuration file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ContourResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ContourError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ContourResult<()> {
        if self.workers == 0 {
            return Err(ContourError::invalid_config("workers must be > 0"));
        }

        if self.step_x == 0 || self.step_y == 0 {
            return Err(ContourError::invalid_config(format!(
                "step must be > 0, got {}x{}",
                self.step_x, self.step_y
            )));
        }

        if self.target_width == 0 || self.target_height == 0 {
            return Err(ContourError::invalid_config(format!(
                "target resolution must be non-zero, got {}x{}",
                self.target_width, self.target_height
            )));
        }

        if self.step_x > self.target_width || self.step_y > self.target_height {
            return Err(ContourError::invalid_config(format!(
                "step {}x{} exceeds target resolution {}x{}",
                self.step_x, self.step_y, self.target_width, self.target_height
            )));
        }

        Ok(())
    }
}
