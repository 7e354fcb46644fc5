//! Consensus scoring and inlier classification.
//!
//! The consensus score of a joint model is the number of points of both
//! full sets that lie within a fixed threshold of their own set's
//! primitive. Lines use the algebraic residual, which is the exact
//! distance for a unit normal. Parabolas use the exact Euclidean
//! distance, found by minimising the squared distance over the curve
//! abscissa: its stationary points are the real roots of a cubic.

use nalgebra::Point2;

use crate::core::{InlierClassifier, JointModel};
use crate::models::{Line, Parabola};
use crate::types::{point_at, DataMatrix, PointSetId};
use crate::utils::polynomial_real_roots;

/// Inlier counts of one joint model.
///
/// Ordering compares `inlier_count` first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    pub inlier_count: usize,
    /// Inlier counts per set `[A, B]`.
    pub per_set: [usize; 2],
}

impl Score {
    pub fn new(per_set: [usize; 2]) -> Self {
        Self {
            inlier_count: per_set[0] + per_set[1],
            per_set,
        }
    }
}

/// Inlier-count scoring over both point sets.
pub struct InlierCountScoring<C> {
    classifier: C,
}

impl<C> InlierCountScoring<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Score `model` against every row of `set_a` and `set_b`.
    ///
    /// `inliers_out` receives the inlier row indices of each set.
    pub fn score<M>(
        &self,
        set_a: &DataMatrix,
        set_b: &DataMatrix,
        model: &M,
        inliers_out: &mut [Vec<usize>; 2],
    ) -> Score
    where
        M: JointModel,
        C: InlierClassifier<M::Primitive>,
    {
        let mut per_set = [0usize; 2];
        for (id, set) in PointSetId::BOTH.into_iter().zip([set_a, set_b]) {
            let primitive = model.primitive(id);
            let out = &mut inliers_out[id.index()];
            out.clear();
            for row in 0..set.nrows() {
                if self.classifier.is_inlier(&point_at(set, row), &primitive) {
                    out.push(row);
                }
            }
            per_set[id.index()] = out.len();
        }
        Score::new(per_set)
    }
}

/// `|n0 * x + n1 * y + c| < threshold`.
pub fn is_line_inlier(point: &Point2<f64>, line: &Line, threshold: f64) -> bool {
    line.residual(point).abs() < threshold
}

/// Cubic whose real roots are the stationary abscissae of the squared
/// distance from `point` to `parabola`, highest degree first.
pub fn distance_cubic(point: &Point2<f64>, parabola: &Parabola) -> [f64; 4] {
    let Parabola { a, b, c } = *parabola;
    let dc = c - point.y;
    [
        4.0 * a * a,
        6.0 * a * b,
        2.0 * (b * b + 2.0 * a * dc + 1.0),
        2.0 * b * dc - 2.0 * point.x,
    ]
}

/// Minimum squared Euclidean distance from `point` to `parabola`.
///
/// Returns `None` when the stationary-point equation yields no real root.
pub fn parabola_min_squared_distance(point: &Point2<f64>, parabola: &Parabola) -> Option<f64> {
    polynomial_real_roots(&distance_cubic(point, parabola))
        .into_iter()
        .map(|x| parabola.squared_distance_at(x, point))
        .min_by(|l, r| l.total_cmp(r))
}

/// Exact distance test against a parabola. Points for which no real
/// stationary point is found are not inliers.
pub fn is_parabola_inlier(point: &Point2<f64>, parabola: &Parabola, threshold: f64) -> bool {
    parabola_min_squared_distance(point, parabola)
        .map(|d2| d2 < threshold * threshold)
        .unwrap_or(false)
}

/// Point-to-line classifier with a fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct LineInlierClassifier {
    pub threshold: f64,
}

impl LineInlierClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl InlierClassifier<Line> for LineInlierClassifier {
    fn is_inlier(&self, point: &Point2<f64>, primitive: &Line) -> bool {
        is_line_inlier(point, primitive, self.threshold)
    }
}

/// Exact point-to-parabola classifier with a fixed threshold.
#[derive(Debug, Clone, Copy)]
pub struct ParabolaInlierClassifier {
    pub threshold: f64,
}

impl ParabolaInlierClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }
}

impl InlierClassifier<Parabola> for ParabolaInlierClassifier {
    fn is_inlier(&self, point: &Point2<f64>, primitive: &Parabola) -> bool {
        is_parabola_inlier(point, primitive, self.threshold)
    }
}
