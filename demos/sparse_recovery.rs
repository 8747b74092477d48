//! Sparse Recovery Example
//!
//! Recovers a sparse signal from noiseless observations, tracks the
//! modified variant's coefficients on the true support across iterations,
//! and compares the recovered support against the ground truth for each
//! update policy.

use bregman::prelude::*;

/// Print a trajectory row at most this often.
const TRAJECTORY_STRIDE: usize = 20;

fn main() -> Result<()> {
    env_logger::init();

    let problem = ProblemBuilder::new(400, 100)
        .signal(SignalKind::Sparse)
        .noise(false)
        .seed(1)
        .build()?;
    let support = problem.support();

    println!("=== Sparse recovery ===\n");
    println!("True support: {:?}\n", support);

    let settings = Settings {
        num_samp: 40,
        max_iter: 200,
        lambda: 4.0,
        seed: 1,
    };
    let max_iter = settings.max_iter;
    let mut solver = Solver::new(&problem, settings)?;

    // Per-iteration trajectory of the modified variant on the true support.
    let mut trajectory: Vec<Vec<f64>> = Vec::with_capacity(max_iter);
    while solver.iteration() < max_iter {
        solver.step();
        let x = solver.state(Variant::Modified).estimate();
        trajectory.push(support.iter().map(|&j| x[j]).collect());
    }

    println!("Modified-variant coefficients on the true support:");
    print!("{:>6}", "iter");
    for &j in &support {
        print!("  {:>9}", format!("x[{}]", j));
    }
    println!();
    for (i, row) in trajectory.iter().enumerate() {
        if i % TRAJECTORY_STRIDE != 0 && i + 1 != max_iter {
            continue;
        }
        print!("{:>6}", i + 1);
        for v in row {
            print!("  {:>9.4}", v);
        }
        println!();
    }
    println!();

    let solution = solver.run();
    for variant in Variant::ALL {
        let x = solution.estimate(variant);
        let recovered: Vec<usize> = x
            .iter()
            .enumerate()
            .filter(|(_, v)| v.abs() > 1e-6)
            .map(|(j, _)| j)
            .collect();
        println!("--- {} ---", variant.label());
        println!("  recovered support: {:?}", recovered);
        for &j in &support {
            println!(
                "  x[{:>3}]: true {:>9.6}, recovered {:>9.6}",
                j,
                problem.x_true()[j],
                x[j]
            );
        }
        println!(
            "  model error: {:.6}\n",
            solution
                .metrics
                .model_error(variant)
                .last()
                .copied()
                .unwrap_or(f64::NAN)
        );
    }

    Ok(())
}
