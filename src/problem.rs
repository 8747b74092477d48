//! Problem instances and synthetic problem generation.
//!
//! A [`ProblemInstance`] holds the coefficient matrix A, the ground-truth
//! signal and the observation vector for one run of the solver. It is
//! immutable for the duration of the solve; the core only ever reads it.
//!
//! Use the builder to generate a synthetic instance:
//! ```ignore
//! let problem = ProblemBuilder::new(2000, 500)
//!     .signal(SignalKind::Sparse)
//!     .noise(true)
//!     .seed(0)
//!     .build()?;
//! ```

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand_distr::StandardNormal;

use crate::error::{BregmanError, Result};

/// Standard deviation of the observation perturbation when noise is enabled.
const NOISE_STD: f64 = 0.01;

/// Shape of the ground-truth signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Roughly one coordinate in ten is nonzero, drawn standard normal.
    Sparse,
    /// Smooth exponential decay, `x_j = exp(-10 j / n)`.
    Decaying,
}

/// A linear inverse problem y = Ax with known ground truth.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    a: DMatrix<f64>,
    x_true: DVector<f64>,
    y: DVector<f64>,
}

impl ProblemInstance {
    /// Create an instance from pre-built parts, checking shapes.
    pub fn new(a: DMatrix<f64>, x_true: DVector<f64>, y: DVector<f64>) -> Result<Self> {
        if x_true.len() != a.ncols() {
            return Err(BregmanError::ShapeMismatch {
                expected: format!("x_true of length {}", a.ncols()),
                got: format!("length {}", x_true.len()),
            });
        }
        if y.len() != a.nrows() {
            return Err(BregmanError::ShapeMismatch {
                expected: format!("y of length {}", a.nrows()),
                got: format!("length {}", y.len()),
            });
        }
        if a.nrows() == 0 || a.ncols() == 0 {
            return Err(BregmanError::InvalidProblem(
                "coefficient matrix must be non-empty".into(),
            ));
        }
        Ok(ProblemInstance { a, x_true, y })
    }

    /// Number of observations (rows of A).
    pub fn num_observations(&self) -> usize {
        self.a.nrows()
    }

    /// Number of unknowns (columns of A).
    pub fn num_unknowns(&self) -> usize {
        self.a.ncols()
    }

    /// The coefficient matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.a
    }

    /// The ground-truth signal. Used only for reporting, never inside the
    /// update rule.
    pub fn x_true(&self) -> &DVector<f64> {
        &self.x_true
    }

    /// The observation vector.
    pub fn observations(&self) -> &DVector<f64> {
        &self.y
    }

    /// Indices of the nonzero entries of the ground-truth signal.
    pub fn support(&self) -> Vec<usize> {
        self.x_true
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Builder for synthetic problem instances.
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    m: usize,
    n: usize,
    signal: SignalKind,
    noise: bool,
    seed: u64,
}

impl ProblemBuilder {
    /// Start a builder for an m x n problem.
    pub fn new(m: usize, n: usize) -> Self {
        ProblemBuilder {
            m,
            n,
            signal: SignalKind::Sparse,
            noise: false,
            seed: 0,
        }
    }

    /// Choose the ground-truth signal shape.
    pub fn signal(mut self, kind: SignalKind) -> Self {
        self.signal = kind;
        self
    }

    /// Add Gaussian perturbation to the observations.
    pub fn noise(mut self, noise: bool) -> Self {
        self.noise = noise;
        self
    }

    /// Seed for the generation RNG. The same seed reproduces the instance
    /// bit-for-bit.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate the instance.
    pub fn build(self) -> Result<ProblemInstance> {
        if self.m == 0 || self.n == 0 {
            return Err(BregmanError::InvalidProblem(
                "problem dimensions must be positive".into(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);

        let a = DMatrix::from_fn(self.m, self.n, |_, _| rng.sample::<f64, _>(StandardNormal));

        let x_true = match self.signal {
            SignalKind::Sparse => {
                let mut x = DVector::zeros(self.n);
                // One in ten coordinates carries a value, at least one overall.
                let k = (self.n / 10).max(1);
                let mut idx: Vec<usize> = (0..self.n).collect();
                idx.shuffle(&mut rng);
                for &j in &idx[..k] {
                    x[j] = rng.sample::<f64, _>(StandardNormal);
                }
                x
            }
            SignalKind::Decaying => {
                let n = self.n as f64;
                DVector::from_fn(self.n, |j, _| (-10.0 * j as f64 / n).exp())
            }
        };

        let mut y = &a * &x_true;
        if self.noise {
            for v in y.iter_mut() {
                *v += NOISE_STD * rng.sample::<f64, _>(StandardNormal);
            }
        }

        ProblemInstance::new(a, x_true, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_expected_shapes() {
        let problem = ProblemBuilder::new(40, 20).build().unwrap();
        assert_eq!(problem.num_observations(), 40);
        assert_eq!(problem.num_unknowns(), 20);
        assert_eq!(problem.x_true().len(), 20);
        assert_eq!(problem.observations().len(), 40);
    }

    #[test]
    fn sparse_signal_has_small_support() {
        let problem = ProblemBuilder::new(50, 30)
            .signal(SignalKind::Sparse)
            .build()
            .unwrap();
        let support = problem.support();
        assert!(!support.is_empty());
        assert!(
            support.len() <= 3,
            "expected ~n/10 nonzeros, got {}",
            support.len()
        );
    }

    #[test]
    fn decaying_signal_is_positive_and_monotone() {
        let problem = ProblemBuilder::new(30, 25)
            .signal(SignalKind::Decaying)
            .build()
            .unwrap();
        let x = problem.x_true();
        for j in 1..x.len() {
            assert!(x[j] > 0.0);
            assert!(x[j] < x[j - 1]);
        }
    }

    #[test]
    fn noiseless_observations_match_model() {
        let problem = ProblemBuilder::new(30, 10).noise(false).build().unwrap();
        let expected = problem.matrix() * problem.x_true();
        assert_eq!(problem.observations(), &expected);
    }

    #[test]
    fn same_seed_reproduces_instance() {
        let p1 = ProblemBuilder::new(25, 15).noise(true).seed(7).build().unwrap();
        let p2 = ProblemBuilder::new(25, 15).noise(true).seed(7).build().unwrap();
        assert_eq!(p1.matrix(), p2.matrix());
        assert_eq!(p1.x_true(), p2.x_true());
        assert_eq!(p1.observations(), p2.observations());
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let a = DMatrix::zeros(4, 3);
        let x = DVector::zeros(2);
        let y = DVector::zeros(4);
        assert!(matches!(
            ProblemInstance::new(a, x, y),
            Err(BregmanError::ShapeMismatch { .. })
        ));
    }
}
