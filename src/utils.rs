//! Miscellaneous numeric utilities.
//!
//! A small seeded wrapper around `rand` used by the samplers, and a real
//! polynomial root finder used by the exact point-to-parabola distance.

use nalgebra::{DMatrix, Schur};
use rand::distributions::Uniform;
use rand::prelude::*;

/// Imaginary parts below this are treated as zero when filtering roots.
const REAL_ROOT_TOLERANCE: f64 = 1e-8;

/// Uniform index generator over a seeded `StdRng`.
///
/// The generator is an explicit handle owned by whoever samples; there is
/// no process-global random state.
pub struct UniformRandomGenerator {
    rng: StdRng,
}

impl UniformRandomGenerator {
    /// Construct with a fixed seed for reproducible draws.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fill `out` with independent draws from `[min, max]`. Values may repeat.
    pub fn gen_with_replacement(&mut self, out: &mut [usize], min: usize, max: usize) {
        let dist = Uniform::new_inclusive(min, max);
        for slot in out.iter_mut() {
            *slot = self.rng.sample(dist);
        }
    }
}

/// Real roots of `coeffs[0] * x^n + coeffs[1] * x^(n-1) + ... + coeffs[n]`.
///
/// Leading coefficients that are negligible relative to the largest one
/// are dropped, so a cubic with a vanishing leading term is solved as a
/// quadratic (or linear) equation. Roots of degree >= 2 polynomials are the
/// eigenvalues of the companion matrix; those with a non-negligible
/// imaginary part are discarded. Returns an empty vector for constant
/// polynomials or when the eigenvalue iteration fails.
pub fn polynomial_real_roots(coeffs: &[f64]) -> Vec<f64> {
    let scale = coeffs.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return Vec::new();
    }

    let lead = coeffs
        .iter()
        .position(|c| c.abs() > scale * f64::EPSILON)
        .unwrap_or(coeffs.len());
    let coeffs = &coeffs[lead..];
    let degree = coeffs.len().saturating_sub(1);

    match degree {
        0 => Vec::new(),
        1 => vec![-coeffs[1] / coeffs[0]],
        _ => {
            let mut comp = DMatrix::<f64>::zeros(degree, degree);
            for j in 0..degree {
                comp[(0, j)] = -coeffs[j + 1] / coeffs[0];
            }
            for i in 1..degree {
                comp[(i, i - 1)] = 1.0;
            }

            let Some(schur) = Schur::try_new(comp, f64::EPSILON, 1000) else {
                return Vec::new();
            };
            schur
                .complex_eigenvalues()
                .iter()
                .filter(|v| v.im.abs() <= REAL_ROOT_TOLERANCE * (1.0 + v.re.abs()))
                .map(|v| v.re)
                .collect()
        }
    }
}
