//! Sampling strategies.
//!
//! The driver draws one sample per point set each iteration through the
//! shared `Sampler` trait.

pub mod uniform;

pub use uniform::UniformReplacementSampler;
