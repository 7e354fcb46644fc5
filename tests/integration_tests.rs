//! Integration tests for the high-level API.
//!
//! Most scenes put inliers exactly on the true primitives and push a fixed
//! share of rows off them by a seeded random amount. The broad-noise scenes
//! perturb every row with seeded uniform noise instead. Every run is
//! reproducible.

use approx::assert_abs_diff_eq;
use nalgebra::Vector2;
use parallel_fit::core::run_ransac;
use parallel_fit::estimators::{ParallelLineEstimator, ParallelParabolaEstimator};
use parallel_fit::scoring::is_parabola_inlier;
use parallel_fit::types::DataMatrix;
use parallel_fit::*;
use rand::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Points `start + t * direction`; every `outlier_every`-th row gets `y`
/// raised by a value drawn from `outlier_shift`.
fn line_points(
    start: (f64, f64),
    direction: Vector2<f64>,
    ts: &[f64],
    outlier_every: usize,
    outlier_shift: std::ops::Range<f64>,
    seed: u64,
) -> (DataMatrix, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = DataMatrix::zeros(ts.len(), 2);
    let mut outliers = Vec::new();
    for (i, &t) in ts.iter().enumerate() {
        set[(i, 0)] = start.0 + t * direction.x;
        set[(i, 1)] = start.1 + t * direction.y;
        if i % outlier_every == 0 {
            set[(i, 1)] += rng.gen_range(outlier_shift.clone());
            outliers.push(i);
        }
    }
    (set, outliers)
}

/// Points on `y = a x^2 + b x + c`, outliers as in [`line_points`].
fn parabola_points(
    coeffs: (f64, f64, f64),
    xs: &[f64],
    outlier_every: usize,
    outlier_shift: std::ops::Range<f64>,
    seed: u64,
) -> (DataMatrix, Vec<usize>) {
    let (a, b, c) = coeffs;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut set = DataMatrix::zeros(xs.len(), 2);
    let mut outliers = Vec::new();
    for (i, &x) in xs.iter().enumerate() {
        set[(i, 0)] = x;
        set[(i, 1)] = a * x * x + b * x + c;
        if i % outlier_every == 0 {
            set[(i, 1)] += rng.gen_range(outlier_shift.clone());
            outliers.push(i);
        }
    }
    (set, outliers)
}

/// Every coordinate listed in `noisy` gets uniform noise from `noise`.
fn add_uniform_noise(
    set: &DataMatrix,
    noisy: &[usize],
    noise: std::ops::Range<f64>,
    seed: u64,
) -> DataMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = set.clone();
    for i in 0..out.nrows() {
        for &c in noisy {
            out[(i, c)] += rng.gen_range(noise.clone());
        }
    }
    out
}

fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil() as usize;
    (0..n).map(|k| start + k as f64 * step).collect()
}

fn complement(n: usize, outliers: &[usize]) -> Vec<usize> {
    (0..n).filter(|i| !outliers.contains(i)).collect()
}

struct LineScene {
    set_a: DataMatrix,
    set_b: DataMatrix,
    outliers: [Vec<usize>; 2],
    normal: Vector2<f64>,
    offsets: [f64; 2],
}

fn line_scene() -> LineScene {
    let direction = Vector2::new(3.2, 6.7).normalize();
    let normal = Vector2::new(direction.y, -direction.x);
    let (set_a, out_a) = line_points(
        (20.0, 10.0),
        direction,
        &arange(0.0, 100.0, 1.2),
        6,
        1.0..3.0,
        2021,
    );
    let (set_b, out_b) = line_points(
        (4.0, 8.9),
        direction,
        &arange(-50.0, 50.0, 1.0),
        6,
        1.0..3.0,
        2022,
    );
    LineScene {
        set_a,
        set_b,
        outliers: [out_a, out_b],
        normal,
        offsets: [
            -normal.dot(&Vector2::new(20.0, 10.0)),
            -normal.dot(&Vector2::new(4.0, 8.9)),
        ],
    }
}

fn oriented(model: &ParallelLines, reference: &Vector2<f64>) -> ParallelLines {
    if model.normal.dot(reference) < 0.0 {
        model.flipped()
    } else {
        model.clone()
    }
}

fn line_settings(scene: &LineScene) -> RansacSettings {
    let total = scene.set_a.nrows() + scene.set_b.nrows();
    RansacSettings {
        sample_size: 3,
        consensus_goal: total * 8 / 10,
        max_iterations: 100,
        stop_at_goal: true,
        inlier_threshold: 0.1,
        ..RansacSettings::default()
    }
}

#[test]
fn test_fit_parallel_lines_with_outliers() {
    init_logger();
    let scene = line_scene();
    let total = scene.set_a.nrows() + scene.set_b.nrows();
    let settings = line_settings(&scene);

    let outcome = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings.clone())).unwrap();

    let model = oriented(outcome.best_model.as_ref().unwrap(), &scene.normal);
    assert_abs_diff_eq!(model.normal.norm(), 1.0, epsilon = 1e-6);
    assert!((model.normal - scene.normal).norm() < 0.05);
    assert!(outcome.best_score.inlier_count as f64 > 0.8 * total as f64);
    assert!(outcome.reached_goal);
    assert!(outcome.iterations <= settings.max_iterations);
}

#[test]
fn test_fit_parallel_lines_finds_exact_consensus() {
    init_logger();
    let scene = line_scene();
    let settings = RansacSettings {
        stop_at_goal: false,
        ..line_settings(&scene)
    };

    let outcome = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings)).unwrap();
    let model = oriented(outcome.best_model.as_ref().unwrap(), &scene.normal);

    assert_abs_diff_eq!(model.normal.x, scene.normal.x, epsilon = 1e-6);
    assert_abs_diff_eq!(model.normal.y, scene.normal.y, epsilon = 1e-6);
    assert_abs_diff_eq!(model.offsets[0], scene.offsets[0], epsilon = 1e-5);
    assert_abs_diff_eq!(model.offsets[1], scene.offsets[1], epsilon = 1e-5);

    let expected_a = complement(scene.set_a.nrows(), &scene.outliers[0]);
    let expected_b = complement(scene.set_b.nrows(), &scene.outliers[1]);
    assert_eq!(
        outcome.best_score.inlier_count,
        expected_a.len() + expected_b.len()
    );
    assert_eq!(outcome.inliers, [expected_a, expected_b]);
    assert_eq!(outcome.iterations, 100);
}

#[test]
fn test_fit_parallel_lines_under_broad_noise() {
    init_logger();
    let direction = Vector2::new(3.2, 6.7).normalize();
    let normal = Vector2::new(direction.y, -direction.x);
    let clean_a = DataMatrix::from_fn(84, 2, |i, c| {
        [20.0, 10.0][c] + 1.2 * i as f64 * direction[c]
    });
    let clean_b = DataMatrix::from_fn(100, 2, |i, c| {
        [4.0, 8.9][c] + (i as f64 - 50.0) * direction[c]
    });
    let set_a = add_uniform_noise(&clean_a, &[0, 1], -1.0..3.0, 2021);
    let set_b = add_uniform_noise(&clean_b, &[0, 1], -1.0..3.0, 2022);

    // Sample sizing from the smaller set, threshold 0.1. Noise this wide
    // leaves only a small share of points within the threshold, so the
    // consensus is not compared against the point count.
    let settings = RansacSettings::for_point_sets(set_a.nrows(), set_b.nrows());
    assert_eq!(settings.sample_size, 25);
    assert_eq!(settings.inlier_threshold, 0.1);

    let outcome = fit_parallel_lines(&set_a, &set_b, Some(settings)).unwrap();
    let model = oriented(outcome.best_model.as_ref().unwrap(), &normal);

    assert_abs_diff_eq!(model.normal.norm(), 1.0, epsilon = 1e-6);
    assert!((model.normal - normal).norm() < 0.05);
    assert!(outcome.best_score.inlier_count > 0);
}

#[test]
fn test_ransac_is_deterministic_for_a_seed() {
    let scene = line_scene();
    let settings = line_settings(&scene);
    let first = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings.clone())).unwrap();
    let second = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings)).unwrap();

    assert_eq!(first.best_model, second.best_model);
    assert_eq!(first.best_score, second.best_score);
    assert_eq!(first.score_trace, second.score_trace);
}

#[test]
fn test_best_score_never_decreases() {
    let scene = line_scene();
    for seed in [1, 7, 2021, 99] {
        let settings = RansacSettings {
            seed,
            stop_at_goal: false,
            max_iterations: 40,
            ..line_settings(&scene)
        };
        let outcome = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings)).unwrap();
        assert_eq!(outcome.score_trace.len(), 40);
        assert!(outcome.score_trace.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(
            *outcome.score_trace.last().unwrap(),
            outcome.best_score.inlier_count
        );
    }
}

#[test]
fn test_early_stop_at_first_iteration_over_goal() {
    let scene = line_scene();
    let settings = RansacSettings {
        consensus_goal: 60,
        ..line_settings(&scene)
    };
    let outcome = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings)).unwrap();

    assert!(outcome.reached_goal);
    assert_eq!(outcome.score_trace.len(), outcome.iterations);
    let (last, earlier) = outcome.score_trace.split_last().unwrap();
    assert!(*last > 60);
    assert!(earlier.iter().all(|&s| s <= 60));
}

#[test]
fn test_zero_iterations_return_no_model() {
    let scene = line_scene();
    let settings = RansacSettings {
        max_iterations: 0,
        ..line_settings(&scene)
    };
    let outcome = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings)).unwrap();
    assert!(outcome.best_model.is_none());
    assert_eq!(outcome.best_score.inlier_count, 0);
    assert_eq!(outcome.iterations, 0);
}

#[test]
fn test_oversized_sample_is_rejected() {
    let scene = line_scene();
    let settings = RansacSettings {
        sample_size: 500,
        ..line_settings(&scene)
    };
    let result = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings));
    assert!(matches!(
        result,
        Err(FitError::SampleTooLarge {
            sample_size: 500,
            available: 84
        })
    ));
}

#[test]
fn test_refit_on_inliers_keeps_consensus() {
    init_logger();
    // Inliers carry a small bounded jitter so the refit actually moves.
    let scene = line_scene();
    let mut rng = StdRng::seed_from_u64(5);
    let jitter = |set: &DataMatrix, rng: &mut StdRng| {
        set.map(|v| v + rng.gen_range(-0.01..0.01))
    };
    let set_a = jitter(&scene.set_a, &mut rng);
    let set_b = jitter(&scene.set_b, &mut rng);

    let base = RansacSettings {
        stop_at_goal: false,
        ..line_settings(&scene)
    };
    let plain = fit_parallel_lines(&set_a, &set_b, Some(base.clone())).unwrap();
    let refit = fit_parallel_lines(
        &set_a,
        &set_b,
        Some(RansacSettings {
            refit_on_inliers: true,
            ..base
        }),
    )
    .unwrap();

    assert!(refit.best_score.inlier_count >= plain.best_score.inlier_count);
    let model = oriented(refit.best_model.as_ref().unwrap(), &scene.normal);
    assert_abs_diff_eq!(model.normal.norm(), 1.0, epsilon = 1e-9);
    assert!((model.normal - scene.normal).norm() < 0.01);
}

struct ParabolaScene {
    set_a: DataMatrix,
    set_b: DataMatrix,
}

fn parabola_scene() -> ParabolaScene {
    let xs = arange(-15.0, 15.0, 0.8);
    let (set_a, _) = parabola_points((0.5, 1.0, 5.0), &xs, 5, 3.0..4.0, 2021);
    let (set_b, _) = parabola_points((0.5, 1.0, 30.0), &xs, 5, 3.0..4.0, 2022);
    ParabolaScene { set_a, set_b }
}

fn parabola_settings() -> RansacSettings {
    RansacSettings {
        sample_size: 3,
        consensus_goal: 59,
        max_iterations: 100,
        stop_at_goal: true,
        inlier_threshold: 0.05,
        ..RansacSettings::default()
    }
}

#[test]
fn test_fit_parallel_parabolas_with_outliers() {
    init_logger();
    let scene = parabola_scene();
    assert_eq!(scene.set_a.nrows(), 38);

    let outcome =
        fit_parallel_parabolas(&scene.set_a, &scene.set_b, Some(parabola_settings())).unwrap();
    let model = outcome.best_model.unwrap();

    assert!((model.a - 0.5).abs() < 0.05);
    assert!((model.b - 1.0).abs() < 0.1);
    assert!((model.intercepts[0] - 5.0).abs() < 0.5);
    assert!((model.intercepts[1] - 30.0).abs() < 0.5);
    // 8 of 38 rows per set are outliers.
    assert_eq!(outcome.best_score.per_set, [30, 30]);
    assert!(outcome.reached_goal);
}

#[test]
fn test_fit_parallel_parabolas_under_broad_noise() {
    init_logger();
    let xs = arange(-15.0, 15.0, 0.8);
    let exact = |c: f64| DataMatrix::from_fn(xs.len(), 2, |i, col| {
        let x = xs[i];
        if col == 0 {
            x
        } else {
            0.5 * x * x + x + c
        }
    });
    let set_a = add_uniform_noise(&exact(5.0), &[1], -1.5..3.0, 2021);
    let set_b = add_uniform_noise(&exact(30.0), &[1], -1.5..3.0, 2022);

    // As for lines, no consensus share is asserted under this noise.
    let settings = RansacSettings::for_point_sets(set_a.nrows(), set_b.nrows())
        .with_inlier_threshold(0.05);
    assert_eq!(settings.sample_size, 11);

    let outcome = fit_parallel_parabolas(&set_a, &set_b, Some(settings)).unwrap();
    let model = outcome.best_model.unwrap();

    assert!((model.a - 0.5).abs() < 0.05, "a = {}", model.a);
    assert!((model.b - 1.0).abs() < 0.1, "b = {}", model.b);
}

#[test]
fn test_closure_driver_matches_high_level_api() {
    let scene = parabola_scene();
    let settings = parabola_settings();
    let estimator = ParallelParabolaEstimator::new();

    let via_closures = run_ransac(
        &scene.set_a,
        &scene.set_b,
        |a, b| estimator.estimate_model(a, b),
        |p, parabola: &Parabola| is_parabola_inlier(p, parabola, settings.inlier_threshold),
        &settings,
    )
    .unwrap();
    let via_api = fit_parallel_parabolas(&scene.set_a, &scene.set_b, Some(settings)).unwrap();

    assert_eq!(via_closures.best_model, via_api.best_model);
    assert_eq!(via_closures.score_trace, via_api.score_trace);
}

#[test]
fn test_custom_driver_assembly() {
    let scene = line_scene();
    let settings = RansacSettings {
        stop_at_goal: false,
        ..line_settings(&scene)
    };
    let mut ransac = ParallelRansac::new(
        settings.clone(),
        ParallelLineEstimator::new(),
        scoring::LineInlierClassifier::new(settings.inlier_threshold),
        samplers::UniformReplacementSampler::from_seed(settings.seed),
    );
    let custom = ransac.run(&scene.set_a, &scene.set_b).unwrap();
    let api = fit_parallel_lines(&scene.set_a, &scene.set_b, Some(settings)).unwrap();
    assert_eq!(custom.best_model, api.best_model);
    assert_eq!(custom.inliers, api.inliers);
}
