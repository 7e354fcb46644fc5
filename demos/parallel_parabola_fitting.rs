//! Example: Robust fitting of two parallel parabolas
//!
//! Both parabolas share `a = 0.5` and `b = 1.0` and differ in their
//! intercepts. Noise is added to `y` only.

use std::time::Instant;

use parallel_fit::estimators::ParallelParabolaEstimator;
use parallel_fit::types::DataMatrix;
use parallel_fit::{fit_parallel_parabolas, Estimator, JointModel, RansacSettings};
use rand::prelude::*;

fn parabola_points(coeffs: (f64, f64, f64), xs: &[f64], noise: (f64, f64), seed: u64) -> DataMatrix {
    let (a, b, c) = coeffs;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = DataMatrix::zeros(xs.len(), 2);
    for (i, &x) in xs.iter().enumerate() {
        points[(i, 0)] = x;
        points[(i, 1)] = a * x * x + b * x + c + rng.gen_range(noise.0..noise.1);
    }
    points
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Parallel Parabola Fitting Example ===\n");

    let xs: Vec<f64> = (0..38).map(|k| -15.0 + 0.8 * k as f64).collect();
    let set_a = parabola_points((0.5, 1.0, 5.0), &xs, (-0.4, 3.0), 2021);
    let set_b = parabola_points((0.5, 1.0, 30.0), &xs, (-1.0, 1.5), 2022);
    println!("True parabolas: y = 0.5x^2 + 1.0x + {{5, 30}}\n");

    // Plain least squares over every point, for comparison.
    let all_points = ParallelParabolaEstimator::new().estimate_model(&set_a, &set_b)?;
    println!(
        "Least squares on all points: a {:.4}, b {:.4}, c {:?}",
        all_points.a, all_points.b, all_points.intercepts
    );

    let settings = RansacSettings::for_point_sets(set_a.nrows(), set_b.nrows())
        .with_inlier_threshold(0.05);

    let start = Instant::now();
    let outcome = fit_parallel_parabolas(&set_a, &set_b, Some(settings))?;
    let elapsed = start.elapsed();

    println!("\nRANSAC Results:");
    println!(
        "  Inliers: {} ({} in A, {} in B)",
        outcome.best_score.inlier_count,
        outcome.best_score.per_set[0],
        outcome.best_score.per_set[1]
    );
    println!("  Iterations: {}", outcome.iterations);
    match &outcome.best_model {
        Some(p) => {
            let [a, b, c0, c1] = p.params();
            println!("  a {a:.4}, b {b:.4}, c [{c0:.4}, {c1:.4}]");
        }
        None => println!("  No model found"),
    }

    println!("\nruntime: {:.3}[ms]", elapsed.as_secs_f64() * 1e3);
    Ok(())
}
