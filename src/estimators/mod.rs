//! Joint estimators for pairs of parallel primitives.
//!
//! - Parallel lines: unit-norm constrained total least squares (QR + SVD)
//! - Parallel parabolas: ordinary least squares through a thresholded SVD

pub mod line;
pub mod parabola;

pub use line::ParallelLineEstimator;
pub use parabola::ParallelParabolaEstimator;
