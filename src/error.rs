use thiserror::Error;

use crate::types::PointSetId;

/// Failures raised at the call boundary of the fitting routines.
///
/// Numerical degeneracy inside a RANSAC run is not reported here; it
/// only costs the affected iteration its candidate.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("point set {set:?} must be an Nx2 matrix, got {cols} columns")]
    BadShape { set: PointSetId, cols: usize },
    #[error("sample size must be at least 1")]
    ZeroSampleSize,
    #[error("sample size {sample_size} exceeds the smaller point set ({available} points)")]
    SampleTooLarge { sample_size: usize, available: usize },
    #[error("need at least {required} equations, got {available}")]
    NotEnoughEquations { required: usize, available: usize },
    #[error("need at least {required} unknowns, got {available}")]
    NotEnoughUnknowns { required: usize, available: usize },
    #[error("inlier threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),
    #[error("offset block of the triangular factor is singular")]
    SingularSystem,
    #[error("singular value decomposition did not produce the requested factors")]
    SvdFailed,
    #[error("failed to read settings: {0}")]
    SettingsIo(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
