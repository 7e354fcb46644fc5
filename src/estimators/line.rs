//! Joint estimator for two parallel 2D lines.
//!
//! Both lines share a unit normal `(n0, n1)` and have their own offset:
//! `n0 * x + n1 * y + c0 = 0` for set A and `n0 * x + n1 * y + c1 = 0` for
//! set B. Stacking one row per point gives the homogeneous system
//! `M [c0, c1, n0, n1]^T = 0` with rows `[1, 0, x, y]` (A) and
//! `[0, 1, x, y]` (B), which is solved under `n0^2 + n1^2 = 1`.

use nalgebra::{DMatrix, DVector, Vector2, QR, SVD};

use crate::core::Estimator;
use crate::error::FitError;
use crate::models::ParallelLines;
use crate::types::{check_point_set, DataMatrix, PointSetId};

/// Number of constrained (normal) unknowns.
const NORMAL_DIM: usize = 2;

/// Rows needed for the normal block to carry a direction: the two offset
/// rows plus at least one more.
const MIN_EQUATIONS: usize = NORMAL_DIM + 1;

/// Stack both point sets into the augmented design matrix.
///
/// Rows of A come first as `[1, 0, x, y]`, followed by the rows of B as
/// `[0, 1, x, y]`.
pub fn augment(set_a: &DataMatrix, set_b: &DataMatrix) -> DataMatrix {
    let n_a = set_a.nrows();
    let mut m = DataMatrix::zeros(n_a + set_b.nrows(), 4);
    for (offset, selector, set) in [(0, 0, set_a), (n_a, 1, set_b)] {
        for i in 0..set.nrows() {
            let row = offset + i;
            m[(row, selector)] = 1.0;
            m[(row, 2)] = set[(i, 0)];
            m[(row, 3)] = set[(i, 1)];
        }
    }
    m
}

/// Solve `a * x = 0` where the trailing `dim` entries of `x` must have unit
/// norm.
///
/// The upper triangular factor `R` of a QR decomposition of `a` carries the
/// same residual norm as `a`. Its trailing `dim x dim` block alone
/// determines the constrained part: the right singular vector of the
/// smallest singular value. The leading unknowns then follow by back
/// substitution through the leading triangular block.
///
/// Returns `(constrained, free)`; the sign of the pair is arbitrary.
pub fn constrained_least_squares(
    a: &DataMatrix,
    dim: usize,
) -> Result<(DVector<f64>, DVector<f64>), FitError> {
    let (height, width) = a.shape();
    if width < dim + 1 {
        return Err(FitError::NotEnoughUnknowns {
            required: dim + 1,
            available: width,
        });
    }
    if height < dim {
        return Err(FitError::NotEnoughEquations {
            required: dim,
            available: height,
        });
    }

    // Wide systems give a trapezoidal R; pad with zero rows to square.
    let r_thin = QR::new(a.clone()).r();
    let mut r = DMatrix::<f64>::zeros(width, width);
    r.rows_mut(0, r_thin.nrows()).copy_from(&r_thin);

    let lead = width - dim;
    let svd = SVD::new(r.view((lead, lead), (dim, dim)).into_owned(), false, true);
    let v_t = svd.v_t.ok_or(FitError::SvdFailed)?;
    let (smallest, _) = svd.singular_values.argmin();
    let constrained: DVector<f64> = v_t.row(smallest).transpose();

    let r11 = r.view((0, 0), (lead, lead)).into_owned();
    let rhs = -(r.view((0, lead), (lead, dim)) * &constrained);
    let free = r11
        .solve_upper_triangular(&rhs)
        .ok_or(FitError::SingularSystem)?;

    Ok((constrained, free))
}

/// Total least squares fit of two parallel lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParallelLineEstimator;

impl ParallelLineEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl Estimator for ParallelLineEstimator {
    type Model = ParallelLines;

    /// Two rows only fix the offsets and leave the normal arbitrary.
    fn min_equations(&self) -> usize {
        MIN_EQUATIONS
    }

    fn estimate_model(
        &self,
        sample_a: &DataMatrix,
        sample_b: &DataMatrix,
    ) -> Result<ParallelLines, FitError> {
        check_point_set(sample_a, PointSetId::A)?;
        check_point_set(sample_b, PointSetId::B)?;
        let available = sample_a.nrows() + sample_b.nrows();
        if available < MIN_EQUATIONS {
            return Err(FitError::NotEnoughEquations {
                required: MIN_EQUATIONS,
                available,
            });
        }

        let (normal, offsets) = constrained_least_squares(&augment(sample_a, sample_b), NORMAL_DIM)?;
        Ok(ParallelLines::new(
            Vector2::new(normal[0], normal[1]),
            [offsets[0], offsets[1]],
        ))
    }
}
