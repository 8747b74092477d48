//! Randomized mini-batch Linearized Bregman comparison loop.
//!
//! Each iteration draws one random mini-batch of observation rows, shared
//! by all three update policies, then per variant: computes residual and
//! gradient, derives an adaptive step size, updates the dual accumulator
//! under the variant's policy, applies the shrinkage operator, and records
//! diagnostics. The loop always runs its full iteration budget; divergence
//! shows up as non-finite metric values, not as an error.

use log::{debug, info};
use nalgebra::{DMatrix, DVector};

use crate::error::Result;
use crate::metrics::{MetricsSample, MetricsSeries};
use crate::problem::ProblemInstance;
use crate::variant::Variant;

use super::sampler::Sampler;
use super::settings::Settings;
use super::state::VariantState;

/// Result of a full solver run.
#[derive(Debug, Clone)]
pub struct Solution {
    estimates: [DVector<f64>; 3],
    /// Per-iteration diagnostics for every variant.
    pub metrics: MetricsSeries,
    /// Number of iterations executed.
    pub iterations: usize,
}

impl Solution {
    /// Final primal estimate of a variant.
    pub fn estimate(&self, variant: Variant) -> &DVector<f64> {
        &self.estimates[variant.index()]
    }
}

/// The three-variant Linearized Bregman solver.
///
/// Holds all mutable per-run state; the problem instance stays read-only.
/// [`Solver::run`] consumes the remaining iteration budget, or drive the
/// loop one iteration at a time with [`Solver::step`].
pub struct Solver<'a> {
    problem: &'a ProblemInstance,
    settings: Settings,
    sampler: Sampler,
    classic: VariantState,
    modified: VariantState,
    no_threshold: VariantState,
    metrics: MetricsSeries,
    iter: usize,
}

impl<'a> Solver<'a> {
    /// Validate the configuration and set up zero-initialized state.
    pub fn new(problem: &'a ProblemInstance, settings: Settings) -> Result<Self> {
        settings.validate(problem)?;

        let n = problem.num_unknowns();
        let sampler = Sampler::new(n, settings.num_samp, settings.seed)?;
        let metrics = MetricsSeries::with_capacity(settings.max_iter);

        Ok(Solver {
            problem,
            settings,
            sampler,
            classic: VariantState::zeros(n),
            modified: VariantState::zeros(n),
            no_threshold: VariantState::zeros(n),
            metrics,
            iter: 0,
        })
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iter
    }

    /// Current state of a variant.
    pub fn state(&self, variant: Variant) -> &VariantState {
        match variant {
            Variant::Classic => &self.classic,
            Variant::Modified => &self.modified,
            Variant::ModifiedNoThreshold => &self.no_threshold,
        }
    }

    /// Diagnostics recorded so far.
    pub fn metrics(&self) -> &MetricsSeries {
        &self.metrics
    }

    /// Execute one iteration for all three variants from a shared sample.
    pub fn step(&mut self) {
        let i = self.iter + 1; // 1-based, divides the cumulative votes
        let lambda = self.settings.lambda;

        let idx = self.sampler.draw().to_vec();
        let a_sub = self.problem.matrix().select_rows(idx.iter());
        let y_sub = self.problem.observations().select_rows(idx.iter());

        let (g0, t0) = residual_gradient_step(&a_sub, &y_sub, &self.classic.x);
        let (g1, t1) = residual_gradient_step(&a_sub, &y_sub, &self.modified.x);
        let (g2, t2) = residual_gradient_step(&a_sub, &y_sub, &self.no_threshold.x);

        debug!("iteration {i}: steps classic={t0:.3e} modified={t1:.3e} no-threshold={t2:.3e}");

        // Direction votes accumulate before this iteration's dual update,
        // so the damped step already includes the current vote.
        self.modified.accumulate_votes(&g1);
        self.no_threshold.accumulate_votes(&g2);

        // Threshold detection reads the dual as it stood at iteration entry.
        self.modified.flag_crossings(lambda);

        self.classic.plain_update(t0, &g0);
        self.modified.flagged_update(t1, &g1, i);
        self.no_threshold.damped_update(t2, &g2, i);

        self.classic.shrink(lambda);
        self.modified.shrink(lambda);
        self.no_threshold.shrink(lambda);

        let x_true = self.problem.x_true();
        for (variant, state) in [
            (Variant::Classic, &self.classic),
            (Variant::Modified, &self.modified),
            (Variant::ModifiedNoThreshold, &self.no_threshold),
        ] {
            self.metrics
                .record(variant, measure(&a_sub, &y_sub, x_true, &state.x));
        }

        self.iter = i;
    }

    /// Run the remaining iteration budget and return the final estimates
    /// and metric series.
    pub fn run(mut self) -> Solution {
        info!(
            "solving {}x{} instance: num_samp={} max_iter={} lambda={}",
            self.problem.num_observations(),
            self.problem.num_unknowns(),
            self.settings.num_samp,
            self.settings.max_iter,
            self.settings.lambda
        );

        while self.iter < self.settings.max_iter {
            self.step();
        }

        info!(
            "done after {} iterations: model error classic={:.3e} modified={:.3e} no-threshold={:.3e}",
            self.iter,
            last(self.metrics.model_error(Variant::Classic)),
            last(self.metrics.model_error(Variant::Modified)),
            last(self.metrics.model_error(Variant::ModifiedNoThreshold)),
        );

        Solution {
            estimates: [self.classic.x, self.modified.x, self.no_threshold.x],
            metrics: self.metrics,
            iterations: self.iter,
        }
    }
}

/// Solve with the given settings. Convenience wrapper around
/// [`Solver::new`] + [`Solver::run`].
pub fn solve(problem: &ProblemInstance, settings: Settings) -> Result<Solution> {
    Ok(Solver::new(problem, settings)?.run())
}

/// Residual, gradient and adaptive step size for one variant on the
/// current mini-batch: `r = A_sub x - y_sub`, `g = A_subᵀ r`,
/// `t = ‖r‖² / ‖g‖²`. A zero-norm gradient yields a zero step rather than
/// an undefined ratio.
fn residual_gradient_step(
    a_sub: &DMatrix<f64>,
    y_sub: &DVector<f64>,
    x: &DVector<f64>,
) -> (DVector<f64>, f64) {
    let residual = a_sub * x - y_sub;
    let gradient = a_sub.transpose() * &residual;

    let g_sq = gradient.norm_squared();
    let step = if g_sq == 0.0 {
        0.0
    } else {
        residual.norm_squared() / g_sq
    };

    (gradient, step)
}

/// Diagnostics for one variant after its update, measured on the
/// iteration's own mini-batch.
fn measure(
    a_sub: &DMatrix<f64>,
    y_sub: &DVector<f64>,
    x_true: &DVector<f64>,
    x: &DVector<f64>,
) -> MetricsSample {
    MetricsSample {
        relative_residual: (a_sub * x - y_sub).norm() / y_sub.norm(),
        one_norm: x.lp_norm(1),
        model_error: (x_true - x).norm() / x_true.norm(),
    }
}

fn last(series: &[f64]) -> f64 {
    series.last().copied().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{ProblemBuilder, SignalKind};

    const TOL: f64 = 1e-12;

    fn small_problem() -> ProblemInstance {
        ProblemBuilder::new(40, 20)
            .signal(SignalKind::Sparse)
            .seed(3)
            .build()
            .unwrap()
    }

    fn small_settings() -> Settings {
        Settings {
            num_samp: 8,
            max_iter: 10,
            lambda: 4.0,
            seed: 11,
        }
    }

    #[test]
    fn zero_gradient_gives_zero_step() {
        // x = 0 and y_sub = 0 makes the residual, and hence the gradient,
        // identically zero.
        let a_sub = DMatrix::from_element(3, 4, 1.0);
        let y_sub = DVector::zeros(3);
        let x = DVector::zeros(4);
        let (gradient, step) = residual_gradient_step(&a_sub, &y_sub, &x);
        assert_eq!(gradient, DVector::zeros(4));
        assert_eq!(step, 0.0);
    }

    #[test]
    fn step_size_is_residual_over_gradient_norm_ratio() {
        let a_sub = DMatrix::identity(3, 3);
        let y_sub = DVector::from_vec(vec![1.0, 2.0, 2.0]);
        let x = DVector::zeros(3);
        let (gradient, step) = residual_gradient_step(&a_sub, &y_sub, &x);
        // With A = I the gradient equals the residual, so the ratio is 1.
        assert_eq!(gradient, -&y_sub);
        assert!((step - 1.0).abs() < TOL);
    }

    #[test]
    fn invalid_settings_fail_before_iterating() {
        let problem = small_problem();
        let settings = Settings {
            num_samp: 21, // > n
            ..small_settings()
        };
        assert!(Solver::new(&problem, settings).is_err());
    }

    #[test]
    fn run_executes_the_full_budget() {
        let problem = small_problem();
        let solution = solve(&problem, small_settings()).unwrap();
        assert_eq!(solution.iterations, 10);
        assert_eq!(solution.metrics.len(), 10);
        for v in Variant::ALL {
            assert_eq!(solution.estimate(v).len(), 20);
            assert_eq!(solution.metrics.relative_residual(v).len(), 10);
        }
    }

    #[test]
    fn identical_seeds_give_bit_identical_series() {
        let problem = small_problem();
        let a = solve(&problem, small_settings()).unwrap();
        let b = solve(&problem, small_settings()).unwrap();
        for v in Variant::ALL {
            assert_eq!(a.metrics.relative_residual(v), b.metrics.relative_residual(v));
            assert_eq!(a.metrics.one_norm(v), b.metrics.one_norm(v));
            assert_eq!(a.metrics.model_error(v), b.metrics.model_error(v));
            assert_eq!(a.estimate(v), b.estimate(v));
        }
    }

    #[test]
    fn classic_matches_bookkeeping_free_rederivation() {
        // The classic variant must not read votes or flags: re-deriving its
        // trajectory with nothing but the sampler, the plain update and the
        // shrinkage must reproduce it bit-for-bit.
        let problem = small_problem();
        let settings = small_settings();
        let solution = solve(&problem, settings.clone()).unwrap();

        let mut sampler =
            Sampler::new(problem.num_unknowns(), settings.num_samp, settings.seed).unwrap();
        let mut z = DVector::zeros(problem.num_unknowns());
        let mut x = DVector::zeros(problem.num_unknowns());
        for _ in 0..settings.max_iter {
            let idx = sampler.draw().to_vec();
            let a_sub = problem.matrix().select_rows(idx.iter());
            let y_sub = problem.observations().select_rows(idx.iter());
            let (gradient, step) = residual_gradient_step(&a_sub, &y_sub, &x);
            z.axpy(-step, &gradient, 1.0);
            x = super::super::shrink::soft_threshold(&z, settings.lambda);
        }

        assert_eq!(solution.estimate(Variant::Classic), &x);
    }

    #[test]
    fn elimination_flags_are_monotone_across_iterations() {
        let problem = ProblemBuilder::new(60, 30)
            .signal(SignalKind::Sparse)
            .seed(5)
            .build()
            .unwrap();
        let settings = Settings {
            num_samp: 12,
            max_iter: 25,
            lambda: 4.0,
            seed: 2,
        };

        let mut solver = Solver::new(&problem, settings).unwrap();
        let mut previous = solver.state(Variant::Modified).eliminated().to_vec();
        for _ in 0..25 {
            solver.step();
            let current = solver.state(Variant::Modified).eliminated();
            for (before, after) in previous.iter().zip(current.iter()) {
                assert!(!*before || *after, "elimination flag cleared");
            }
            previous = current.to_vec();
        }

        // The no-threshold variant never flags anything.
        assert!(solver
            .state(Variant::ModifiedNoThreshold)
            .eliminated()
            .iter()
            .all(|f| !f));
    }
}
