//! Linearized Bregman Comparison Example
//!
//! Runs the classic, modified, and modified-without-threshold update
//! policies on one randomized mini-batch problem and prints their metric
//! trajectories side by side.
//!
//! Set RUST_LOG=debug for per-iteration step sizes.

use bregman::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let m = 2000; // observations
    let n = 500; // unknowns
    let problem = ProblemBuilder::new(m, n)
        .signal(SignalKind::Sparse)
        .noise(true)
        .seed(0)
        .build()?;

    println!("=== Linearized Bregman comparison ===\n");
    println!(
        "Problem: {} observations, {} unknowns, {} nonzero coefficients\n",
        m,
        n,
        problem.support().len()
    );

    let settings = Settings {
        num_samp: 100,
        max_iter: 300,
        lambda: 4.0,
        seed: 0,
    };
    let solution = solve(&problem, settings)?;

    println!("{}", render_comparison(Metric::RelativeResidual, &solution.metrics));
    println!("{}", render_comparison(Metric::OneNorm, &solution.metrics));
    println!("{}", render_comparison(Metric::ModelError, &solution.metrics));

    for variant in Variant::ALL {
        let err = solution
            .metrics
            .model_error(variant)
            .last()
            .copied()
            .unwrap_or(f64::NAN);
        println!("{:<26} final model error: {:.6}", variant.label(), err);
    }

    Ok(())
}
