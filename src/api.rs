//! High-level API.
//!
//! One call per primitive: pick the estimator and classifier, seed the
//! sampler from the settings and run the joint RANSAC loop.

use crate::core::{ParallelRansac, RansacOutcome};
use crate::error::FitError;
use crate::estimators::{ParallelLineEstimator, ParallelParabolaEstimator};
use crate::models::{ParallelLines, ParallelParabolas};
use crate::samplers::UniformReplacementSampler;
use crate::scoring::{LineInlierClassifier, ParabolaInlierClassifier};
use crate::settings::RansacSettings;
use crate::types::DataMatrix;

fn resolve_settings(
    set_a: &DataMatrix,
    set_b: &DataMatrix,
    settings_opt: Option<RansacSettings>,
) -> Result<RansacSettings, FitError> {
    let settings = settings_opt
        .unwrap_or_else(|| RansacSettings::for_point_sets(set_a.nrows(), set_b.nrows()));
    settings.validate()?;
    Ok(settings)
}

/// Robustly fit two parallel lines, one to each `N x 2` point set.
///
/// # Arguments
/// * `set_a`, `set_b` - Point sets, one `(x, y)` per row
/// * `settings_opt` - RANSAC settings; `None` sizes the sample from the
///   smaller set (see [`RansacSettings::for_point_sets`])
///
/// # Returns
/// The outcome of the run. `best_model` is `None` if no candidate found
/// any inlier.
pub fn fit_parallel_lines(
    set_a: &DataMatrix,
    set_b: &DataMatrix,
    settings_opt: Option<RansacSettings>,
) -> Result<RansacOutcome<ParallelLines>, FitError> {
    let settings = resolve_settings(set_a, set_b, settings_opt)?;
    let classifier = LineInlierClassifier::new(settings.inlier_threshold);
    let sampler = UniformReplacementSampler::from_seed(settings.seed);

    let mut ransac = ParallelRansac::new(settings, ParallelLineEstimator::new(), classifier, sampler);
    ransac.run(set_a, set_b)
}

/// Robustly fit two parabolas with shared `a`, `b`, one to each `N x 2`
/// point set.
///
/// Inliers are decided on the exact point-to-parabola distance.
pub fn fit_parallel_parabolas(
    set_a: &DataMatrix,
    set_b: &DataMatrix,
    settings_opt: Option<RansacSettings>,
) -> Result<RansacOutcome<ParallelParabolas>, FitError> {
    let settings = resolve_settings(set_a, set_b, settings_opt)?;
    let classifier = ParabolaInlierClassifier::new(settings.inlier_threshold);
    let sampler = UniformReplacementSampler::from_seed(settings.seed);

    let mut ransac = ParallelRansac::new(
        settings,
        ParallelParabolaEstimator::new(),
        classifier,
        sampler,
    );
    ransac.run(set_a, set_b)
}
