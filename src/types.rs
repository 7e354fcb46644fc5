//! Core shared types.
//!
//! Point sets are kept in the same dense layout the solvers consume: an
//! `N x 2` `nalgebra` matrix whose rows are `(x, y)` points. Sampling a
//! subset is then a plain row selection.

use nalgebra::{DMatrix, Point2};

use crate::error::FitError;

/// Dynamic matrix of `f64`. Point sets are `N x 2`, design matrices are
/// `(|A| + |B|) x 4`.
pub type DataMatrix = DMatrix<f64>;

/// Which of the two jointly fitted point sets a row or primitive belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointSetId {
    A,
    B,
}

impl PointSetId {
    pub const BOTH: [PointSetId; 2] = [PointSetId::A, PointSetId::B];

    /// Position of this set in `[A, B]`-ordered arrays.
    pub fn index(self) -> usize {
        match self {
            PointSetId::A => 0,
            PointSetId::B => 1,
        }
    }
}

/// Build an `N x 2` point set from `(x, y)` pairs.
pub fn point_set_from_pairs(points: &[(f64, f64)]) -> DataMatrix {
    DataMatrix::from_fn(points.len(), 2, |r, c| {
        if c == 0 {
            points[r].0
        } else {
            points[r].1
        }
    })
}

/// Row `row` of a point set as a point.
pub fn point_at(set: &DataMatrix, row: usize) -> Point2<f64> {
    Point2::new(set[(row, 0)], set[(row, 1)])
}

/// Check that `set` is laid out as `N x 2`.
pub fn check_point_set(set: &DataMatrix, id: PointSetId) -> Result<(), FitError> {
    if set.ncols() != 2 {
        return Err(FitError::BadShape {
            set: id,
            cols: set.ncols(),
        });
    }
    Ok(())
}
