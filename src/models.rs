//! Geometric models produced by the joint estimators.
//!
//! A joint model shares its leading coefficients between the two point
//! sets and carries one offset per set. [`JointModel::primitive`] splits
//! it into the single line or parabola used to classify one set's points.

use nalgebra::{Point2, Vector2};

use crate::core::JointModel;
use crate::types::PointSetId;

/// Line `n0 * x + n1 * y + c = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub n0: f64,
    pub n1: f64,
    pub c: f64,
}

impl Line {
    pub fn new(n0: f64, n1: f64, c: f64) -> Self {
        Self { n0, n1, c }
    }

    /// Signed algebraic residual. Equals the signed Euclidean distance when
    /// `(n0, n1)` has unit norm.
    pub fn residual(&self, point: &Point2<f64>) -> f64 {
        self.n0 * point.x + self.n1 * point.y + self.c
    }

    /// `y` on the line at `x`, or `None` for (near) vertical lines.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        if self.n1.abs() < 1e-12 {
            return None;
        }
        Some((-self.c - self.n0 * x) / self.n1)
    }
}

/// Parabola `y = a * x^2 + b * x + c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parabola {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Parabola {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn eval(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    /// Squared distance from `point` to the curve point with abscissa `x`.
    pub fn squared_distance_at(&self, x: f64, point: &Point2<f64>) -> f64 {
        let dx = x - point.x;
        let dy = self.eval(x) - point.y;
        dx * dx + dy * dy
    }
}

/// Two parallel lines sharing a unit normal, one offset per point set.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelLines {
    pub normal: Vector2<f64>,
    pub offsets: [f64; 2],
}

impl ParallelLines {
    pub fn new(normal: Vector2<f64>, offsets: [f64; 2]) -> Self {
        Self { normal, offsets }
    }

    /// Flip the sign of the whole model. Both signs describe the same lines.
    pub fn flipped(&self) -> Self {
        Self::new(-self.normal, [-self.offsets[0], -self.offsets[1]])
    }

    /// Distance between the two lines, assuming a unit normal.
    pub fn separation(&self) -> f64 {
        (self.offsets[0] - self.offsets[1]).abs()
    }
}

impl JointModel for ParallelLines {
    type Primitive = Line;

    /// `[n0, n1, c0, c1]`.
    fn params(&self) -> [f64; 4] {
        [self.normal.x, self.normal.y, self.offsets[0], self.offsets[1]]
    }

    fn from_params(p: [f64; 4]) -> Self {
        Self::new(Vector2::new(p[0], p[1]), [p[2], p[3]])
    }

    fn primitive(&self, set: PointSetId) -> Line {
        Line::new(self.normal.x, self.normal.y, self.offsets[set.index()])
    }
}

/// Two parabolas sharing `a` and `b`, one intercept per point set.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelParabolas {
    pub a: f64,
    pub b: f64,
    pub intercepts: [f64; 2],
}

impl ParallelParabolas {
    pub fn new(a: f64, b: f64, intercepts: [f64; 2]) -> Self {
        Self { a, b, intercepts }
    }
}

impl JointModel for ParallelParabolas {
    type Primitive = Parabola;

    /// `[a, b, c0, c1]`.
    fn params(&self) -> [f64; 4] {
        [self.a, self.b, self.intercepts[0], self.intercepts[1]]
    }

    fn from_params(p: [f64; 4]) -> Self {
        Self::new(p[0], p[1], [p[2], p[3]])
    }

    fn primitive(&self, set: PointSetId) -> Parabola {
        Parabola::new(self.a, self.b, self.intercepts[set.index()])
    }
}
