//! Uniform random sampler drawing with replacement.

use crate::core::Sampler;
use crate::utils::UniformRandomGenerator;

/// Uniform random sampler drawing indices independently, with replacement.
///
/// A sample may contain the same row several times. Samplers are always
/// seeded, so runs with equal settings draw equal samples.
pub struct UniformReplacementSampler {
    rng: UniformRandomGenerator,
}

impl UniformReplacementSampler {
    /// Construct a sampler from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: UniformRandomGenerator::from_seed(seed),
        }
    }
}

impl Sampler for UniformReplacementSampler {
    fn sample(&mut self, population: usize, out_indices: &mut [usize]) -> bool {
        if population == 0 || out_indices.is_empty() {
            return false;
        }
        self.rng.gen_with_replacement(out_indices, 0, population - 1);
        true
    }
}
