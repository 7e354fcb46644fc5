//! Core traits and the joint RANSAC driver.
//!
//! The driver is agnostic to the primitive being fitted. It is assembled
//! from:
//! - an [`Estimator`] fitting a [`JointModel`] to one sample of each set,
//! - an [`InlierClassifier`] deciding membership of a point in one of the
//!   model's per-set primitives,
//! - a [`Sampler`] owning the seeded random state.

use log::{debug, trace};
use nalgebra::Point2;

use crate::error::FitError;
use crate::scoring::{InlierCountScoring, Score};
use crate::settings::RansacSettings;
use crate::types::{check_point_set, DataMatrix, PointSetId};

/// A model shared by two point sets: common leading coefficients plus one
/// offset per set.
pub trait JointModel: Clone {
    /// Single primitive (line, parabola) describing one set.
    type Primitive;

    /// Flat `[shared0, shared1, offset_a, offset_b]` representation.
    fn params(&self) -> [f64; 4];

    fn from_params(params: [f64; 4]) -> Self;

    fn primitive(&self, set: PointSetId) -> Self::Primitive;

    fn primitives(&self) -> [Self::Primitive; 2] {
        [self.primitive(PointSetId::A), self.primitive(PointSetId::B)]
    }
}

/// Estimator fitting a joint model to one sample drawn from each set.
pub trait Estimator {
    type Model: JointModel;

    /// Minimum number of rows (over both samples) the solve needs.
    fn min_equations(&self) -> usize;

    fn estimate_model(
        &self,
        sample_a: &DataMatrix,
        sample_b: &DataMatrix,
    ) -> Result<Self::Model, FitError>;
}

/// Membership test of a single point against a single primitive.
pub trait InlierClassifier<P> {
    fn is_inlier(&self, point: &Point2<f64>, primitive: &P) -> bool;
}

/// Sampler drawing row indices into `out_indices`.
pub trait Sampler {
    /// Draw `out_indices.len()` indices from `0..population`.
    ///
    /// Returns `false` if no sample can be drawn from this population.
    fn sample(&mut self, population: usize, out_indices: &mut [usize]) -> bool;
}

/// Adapter turning a closure into an [`Estimator`].
pub struct FnEstimator<M, F>
where
    F: Fn(&DataMatrix, &DataMatrix) -> Result<M, FitError>,
{
    estimate_fn: F,
    min_equations: usize,
    _marker: std::marker::PhantomData<M>,
}

impl<M, F> FnEstimator<M, F>
where
    F: Fn(&DataMatrix, &DataMatrix) -> Result<M, FitError>,
{
    pub fn new(min_equations: usize, estimate_fn: F) -> Self {
        Self {
            estimate_fn,
            min_equations,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<M, F> Estimator for FnEstimator<M, F>
where
    M: JointModel,
    F: Fn(&DataMatrix, &DataMatrix) -> Result<M, FitError>,
{
    type Model = M;

    fn min_equations(&self) -> usize {
        self.min_equations
    }

    fn estimate_model(&self, sample_a: &DataMatrix, sample_b: &DataMatrix) -> Result<M, FitError> {
        (self.estimate_fn)(sample_a, sample_b)
    }
}

/// Adapter turning a closure into an [`InlierClassifier`].
pub struct FnClassifier<F>(pub F);

impl<P, F> InlierClassifier<P> for FnClassifier<F>
where
    F: Fn(&Point2<f64>, &P) -> bool,
{
    fn is_inlier(&self, point: &Point2<f64>, primitive: &P) -> bool {
        (self.0)(point, primitive)
    }
}

/// Result of a RANSAC run.
///
/// `best_model` is `None` when no candidate ever reached a positive
/// consensus score (e.g. `max_iterations == 0`).
#[derive(Debug, Clone)]
pub struct RansacOutcome<M> {
    pub best_model: Option<M>,
    pub best_score: Score,
    /// Inlier row indices of the best model, per set `[A, B]`.
    pub inliers: [Vec<usize>; 2],
    /// Iterations actually performed.
    pub iterations: usize,
    /// Best inlier count after each iteration.
    pub score_trace: Vec<usize>,
    /// Whether the loop ended on the consensus goal.
    pub reached_goal: bool,
}

impl<M> RansacOutcome<M> {
    fn empty() -> Self {
        Self {
            best_model: None,
            best_score: Score::default(),
            inliers: [Vec::new(), Vec::new()],
            iterations: 0,
            score_trace: Vec::new(),
            reached_goal: false,
        }
    }
}

/// Joint RANSAC over two point sets.
///
/// Every iteration draws `sample_size` rows with replacement from each
/// set, fits a candidate, and scores it against both full sets. A
/// candidate replaces the best one only on a strictly higher inlier
/// count, so the first of several tied candidates wins.
pub struct ParallelRansac<E, C, Sa>
where
    E: Estimator,
    C: InlierClassifier<<E::Model as JointModel>::Primitive>,
    Sa: Sampler,
{
    pub settings: RansacSettings,
    pub estimator: E,
    pub scoring: InlierCountScoring<C>,
    pub sampler: Sa,
}

impl<E, C, Sa> ParallelRansac<E, C, Sa>
where
    E: Estimator,
    C: InlierClassifier<<E::Model as JointModel>::Primitive>,
    Sa: Sampler,
{
    pub fn new(settings: RansacSettings, estimator: E, classifier: C, sampler: Sa) -> Self {
        Self {
            settings,
            estimator,
            scoring: InlierCountScoring::new(classifier),
            sampler,
        }
    }

    fn check_preconditions(&self, set_a: &DataMatrix, set_b: &DataMatrix) -> Result<(), FitError> {
        check_point_set(set_a, PointSetId::A)?;
        check_point_set(set_b, PointSetId::B)?;

        let sample_size = self.settings.sample_size;
        if sample_size == 0 {
            return Err(FitError::ZeroSampleSize);
        }
        let available = set_a.nrows().min(set_b.nrows());
        if sample_size > available {
            return Err(FitError::SampleTooLarge {
                sample_size,
                available,
            });
        }
        let required = self.estimator.min_equations();
        if 2 * sample_size < required {
            return Err(FitError::NotEnoughEquations {
                required,
                available: 2 * sample_size,
            });
        }
        Ok(())
    }

    fn draw(&mut self, set: &DataMatrix, indices: &mut [usize]) -> Option<DataMatrix> {
        if !self.sampler.sample(set.nrows(), indices) {
            return None;
        }
        Some(set.select_rows(indices.iter()))
    }

    /// Run the loop on the two point sets.
    pub fn run(
        &mut self,
        set_a: &DataMatrix,
        set_b: &DataMatrix,
    ) -> Result<RansacOutcome<E::Model>, FitError> {
        self.check_preconditions(set_a, set_b)?;

        let sample_size = self.settings.sample_size;
        let mut idx_a = vec![0usize; sample_size];
        let mut idx_b = vec![0usize; sample_size];
        let mut tmp_inliers = [Vec::new(), Vec::new()];

        let mut outcome = RansacOutcome::empty();

        while outcome.iterations < self.settings.max_iterations {
            outcome.iterations += 1;
            let iteration = outcome.iterations;

            let candidate = match (self.draw(set_a, &mut idx_a), self.draw(set_b, &mut idx_b)) {
                (Some(sample_a), Some(sample_b)) => {
                    self.estimator.estimate_model(&sample_a, &sample_b)
                }
                _ => {
                    outcome.score_trace.push(outcome.best_score.inlier_count);
                    continue;
                }
            };

            let model = match candidate {
                Ok(model) => model,
                Err(err) => {
                    trace!("ParallelRansac: iteration {iteration} rejected sample: {err}");
                    outcome.score_trace.push(outcome.best_score.inlier_count);
                    continue;
                }
            };

            let score = self.scoring.score(set_a, set_b, &model, &mut tmp_inliers);
            let improved = score.inlier_count > outcome.best_score.inlier_count;
            if improved {
                debug!(
                    "ParallelRansac: iteration {iteration} improved consensus {} -> {}",
                    outcome.best_score.inlier_count, score.inlier_count
                );
                outcome.best_score = score;
                outcome.best_model = Some(model);
                std::mem::swap(&mut outcome.inliers, &mut tmp_inliers);
            }
            outcome.score_trace.push(outcome.best_score.inlier_count);

            if improved
                && self.settings.stop_at_goal
                && outcome.best_score.inlier_count > self.settings.consensus_goal
            {
                debug!(
                    "ParallelRansac: consensus goal {} exceeded at iteration {iteration}",
                    self.settings.consensus_goal
                );
                outcome.reached_goal = true;
                break;
            }
        }

        if self.settings.refit_on_inliers {
            self.refit(set_a, set_b, &mut outcome);
        }

        Ok(outcome)
    }

    /// Re-estimate the best model from its full inlier sets and keep the
    /// refit unless it loses consensus.
    fn refit(&self, set_a: &DataMatrix, set_b: &DataMatrix, outcome: &mut RansacOutcome<E::Model>) {
        if outcome.best_model.is_none() {
            return;
        }
        let [in_a, in_b] = &outcome.inliers;
        if in_a.is_empty()
            || in_b.is_empty()
            || in_a.len() + in_b.len() < self.estimator.min_equations()
        {
            return;
        }

        let sample_a = set_a.select_rows(in_a.iter());
        let sample_b = set_b.select_rows(in_b.iter());
        let refined = match self.estimator.estimate_model(&sample_a, &sample_b) {
            Ok(model) => model,
            Err(err) => {
                trace!("ParallelRansac: refit on inliers failed: {err}");
                return;
            }
        };

        let mut refined_inliers = [Vec::new(), Vec::new()];
        let score = self
            .scoring
            .score(set_a, set_b, &refined, &mut refined_inliers);
        if score.inlier_count >= outcome.best_score.inlier_count {
            debug!(
                "ParallelRansac: refit kept, consensus {} -> {}",
                outcome.best_score.inlier_count, score.inlier_count
            );
            outcome.best_model = Some(refined);
            outcome.best_score = score;
            outcome.inliers = refined_inliers;
        }
    }
}

/// Closure form of the driver.
///
/// `estimate_fn` fits a joint model to one sample of each set;
/// `is_inlier_fn` tests one point against one per-set primitive. Sampling
/// is seeded from `settings.seed`, so equal inputs give equal outcomes.
pub fn run_ransac<M, F, G>(
    set_a: &DataMatrix,
    set_b: &DataMatrix,
    estimate_fn: F,
    is_inlier_fn: G,
    settings: &RansacSettings,
) -> Result<RansacOutcome<M>, FitError>
where
    M: JointModel,
    F: Fn(&DataMatrix, &DataMatrix) -> Result<M, FitError>,
    G: Fn(&Point2<f64>, &M::Primitive) -> bool,
{
    let estimator = FnEstimator::new(1, estimate_fn);
    let sampler = crate::samplers::UniformReplacementSampler::from_seed(settings.seed);
    let mut ransac =
        ParallelRansac::new(settings.clone(), estimator, FnClassifier(is_inlier_fn), sampler);
    ransac.run(set_a, set_b)
}
