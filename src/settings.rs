//! RANSAC configuration.
//!
//! Settings deserialize from JSON; missing fields take their defaults, so
//! a document only needs to name what it changes.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::FitError;

/// Fraction of the smaller point set drawn per iteration by
/// [`RansacSettings::for_point_sets`].
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.3;

/// Configuration of one joint RANSAC run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RansacSettings {
    /// Rows drawn (with replacement) from each point set per iteration.
    pub sample_size: usize,
    /// Inlier count that must be exceeded to stop early.
    pub consensus_goal: usize,
    /// Fixed iteration budget.
    pub max_iterations: usize,
    /// Stop as soon as a new best model exceeds `consensus_goal`.
    pub stop_at_goal: bool,
    /// Seed of the sampler, for reproducible runs.
    pub seed: u64,
    /// Distance below which a point is an inlier of its primitive.
    pub inlier_threshold: f64,
    /// Re-estimate the best model once from all of its inliers.
    pub refit_on_inliers: bool,
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            sample_size: 10,
            consensus_goal: 20,
            max_iterations: 100,
            stop_at_goal: true,
            seed: 2021,
            inlier_threshold: 0.1,
            refit_on_inliers: false,
        }
    }
}

impl RansacSettings {
    /// Defaults with the sample size set to 30% of the smaller point set
    /// (at least one row) and the consensus goal to twice the sample size.
    pub fn for_point_sets(len_a: usize, len_b: usize) -> Self {
        let sample_size =
            ((len_a.min(len_b) as f64 * DEFAULT_SAMPLE_FRACTION) as usize).max(1);
        Self {
            sample_size,
            consensus_goal: 2 * sample_size,
            ..Self::default()
        }
    }

    pub fn with_inlier_threshold(mut self, threshold: f64) -> Self {
        self.inlier_threshold = threshold;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, FitError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FitError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Check the values that do not depend on the point sets.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.sample_size == 0 {
            return Err(FitError::ZeroSampleSize);
        }
        if !(self.inlier_threshold.is_finite() && self.inlier_threshold > 0.0) {
            return Err(FitError::InvalidThreshold(self.inlier_threshold));
        }
        Ok(())
    }
}
