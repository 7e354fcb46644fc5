//! Joint estimator for two parabolas sharing their quadratic and linear
//! coefficients: `y = a x^2 + b x + c0` (set A) and `y = a x^2 + b x + c1`
//! (set B).

use nalgebra::{DVector, SVD};

use crate::core::Estimator;
use crate::error::FitError;
use crate::models::ParallelParabolas;
use crate::types::{check_point_set, DataMatrix, PointSetId};

/// Singular values at or below this are treated as zero.
pub const DEFAULT_SINGULAR_THRESHOLD: f64 = 1e-9;

const UNKNOWNS: usize = 4;

/// Build `M [a, b, c0, c1]^T = y`.
///
/// Rows of A are `[x^2, x, 1, 0]`, rows of B are `[x^2, x, 0, 1]`; the
/// right-hand side stacks the `y` values in the same order.
pub fn augment(set_a: &DataMatrix, set_b: &DataMatrix) -> (DataMatrix, DVector<f64>) {
    let n_a = set_a.nrows();
    let n = n_a + set_b.nrows();
    let mut m = DataMatrix::zeros(n, UNKNOWNS);
    let mut rhs = DVector::zeros(n);
    for (offset, selector, set) in [(0, 2, set_a), (n_a, 3, set_b)] {
        for i in 0..set.nrows() {
            let row = offset + i;
            let x = set[(i, 0)];
            m[(row, 0)] = x * x;
            m[(row, 1)] = x;
            m[(row, selector)] = 1.0;
            rhs[row] = set[(i, 1)];
        }
    }
    (m, rhs)
}

/// Least squares solution of `a * x = b` through a thresholded
/// pseudo-inverse.
///
/// `b` is projected onto the left singular vectors and divided by the
/// singular values; directions whose singular value is at or below
/// `epsilon` contribute zero. For rank-deficient systems this yields the
/// minimum-norm solution.
pub fn least_squares_svd(
    a: &DataMatrix,
    b: &DVector<f64>,
    epsilon: f64,
) -> Result<DVector<f64>, FitError> {
    let svd = SVD::new(a.clone(), true, true);
    let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
        return Err(FitError::SvdFailed);
    };

    let z = u.tr_mul(b);
    let y = DVector::from_iterator(
        z.len(),
        svd.singular_values
            .iter()
            .zip(z.iter())
            .map(|(&s, &zk)| if s > epsilon { zk / s } else { 0.0 }),
    );
    Ok(v_t.tr_mul(&y))
}

/// Ordinary least squares fit of two parabolas with shared `a` and `b`.
#[derive(Debug, Clone, Copy)]
pub struct ParallelParabolaEstimator {
    pub singular_threshold: f64,
}

impl Default for ParallelParabolaEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelParabolaEstimator {
    pub fn new() -> Self {
        Self {
            singular_threshold: DEFAULT_SINGULAR_THRESHOLD,
        }
    }
}

impl Estimator for ParallelParabolaEstimator {
    type Model = ParallelParabolas;

    fn min_equations(&self) -> usize {
        UNKNOWNS
    }

    fn estimate_model(
        &self,
        sample_a: &DataMatrix,
        sample_b: &DataMatrix,
    ) -> Result<ParallelParabolas, FitError> {
        check_point_set(sample_a, PointSetId::A)?;
        check_point_set(sample_b, PointSetId::B)?;
        let available = sample_a.nrows() + sample_b.nrows();
        if available < UNKNOWNS {
            return Err(FitError::NotEnoughEquations {
                required: UNKNOWNS,
                available,
            });
        }

        let (m, rhs) = augment(sample_a, sample_b);
        let x = least_squares_svd(&m, &rhs, self.singular_threshold)?;
        Ok(ParallelParabolas::new(x[0], x[1], [x[2], x[3]]))
    }
}
