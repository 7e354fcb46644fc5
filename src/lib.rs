//! # parallel-fit - Robust joint fitting of parallel primitives
//!
//! `parallel-fit` estimates two geometrically parallel primitives from two
//! noisy 2D point sets at once: two parallel lines sharing a unit normal,
//! or two parabolas sharing their quadratic and linear coefficients. A
//! RANSAC loop drives closed-form joint solvers and keeps the candidate
//! with the largest consensus over both sets.
//!
//! ## Quick Start
//!
//! ```rust
//! use parallel_fit::{fit_parallel_lines, RansacSettings};
//! use parallel_fit::types::point_set_from_pairs;
//!
//! let a: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, 2.0 * i as f64 + 1.0)).collect();
//! let b: Vec<(f64, f64)> = (0..20).map(|i| (i as f64, 2.0 * i as f64 - 4.0)).collect();
//!
//! let settings = RansacSettings {
//!     sample_size: 3,
//!     ..RansacSettings::default()
//! };
//! let outcome = fit_parallel_lines(
//!     &point_set_from_pairs(&a),
//!     &point_set_from_pairs(&b),
//!     Some(settings),
//! )
//! .unwrap();
//!
//! let lines = outcome.best_model.expect("consensus found");
//! assert!((lines.normal.norm() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Custom models
//!
//! The driver only needs an [`Estimator`](core::Estimator) and an
//! [`InlierClassifier`](core::InlierClassifier); [`run_ransac`](core::run_ransac)
//! accepts both as closures:
//!
//! ```rust
//! use parallel_fit::core::run_ransac;
//! use parallel_fit::estimators::line::{augment, constrained_least_squares};
//! use parallel_fit::models::{Line, ParallelLines};
//! use parallel_fit::scoring::is_line_inlier;
//! use parallel_fit::types::point_set_from_pairs;
//! use parallel_fit::{JointModel, RansacSettings};
//!
//! let a = point_set_from_pairs(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
//! let b = point_set_from_pairs(&[(0.0, 3.0), (1.0, 3.0), (2.0, 3.0)]);
//! let settings = RansacSettings {
//!     sample_size: 2,
//!     ..RansacSettings::default()
//! };
//!
//! let outcome = run_ransac(
//!     &a,
//!     &b,
//!     |sa, sb| {
//!         let (n, c) = constrained_least_squares(&augment(sa, sb), 2)?;
//!         Ok(ParallelLines::from_params([n[0], n[1], c[0], c[1]]))
//!     },
//!     |p, line: &Line| is_line_inlier(p, line, 0.1),
//!     &settings,
//! )
//! .unwrap();
//! assert!(outcome.best_score.inlier_count > 0);
//! ```
//!
//! ## Modules
//!
//! - **[`api`](api)**: one-call fitting of parallel lines and parabolas
//! - **[`core`](core)**: traits and the joint RANSAC driver
//! - **[`estimators`](estimators)**: joint least squares solvers
//! - **[`scoring`](scoring)**: consensus scoring and inlier classifiers
//! - **[`samplers`](samplers)**: seeded sampling with replacement
//! - **[`models`](models)**: line and parabola model types
//! - **[`settings`](settings)**: run configuration

pub mod api;
pub mod core;
pub mod error;
pub mod estimators;
pub mod models;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod types;
pub mod utils;

pub use api::{fit_parallel_lines, fit_parallel_parabolas};

pub use crate::core::{
    run_ransac, Estimator, InlierClassifier, JointModel, ParallelRansac, RansacOutcome, Sampler,
};

pub use error::FitError;
pub use models::{Line, ParallelLines, ParallelParabolas, Parabola};
pub use settings::RansacSettings;
