//! Solver settings.

use crate::error::{BregmanError, Result};
use crate::problem::ProblemInstance;

/// Solver settings.
///
/// All fields are validated against the problem before the first iteration;
/// a violated precondition fails fast with no partial results.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Mini-batch size drawn each iteration. Must satisfy `num_samp <= n`.
    pub num_samp: usize,
    /// Fixed iteration budget. The loop always runs exactly this many
    /// iterations; there is no early stopping.
    pub max_iter: usize,
    /// Soft-threshold parameter, shared by all three variants.
    pub lambda: f64,
    /// Seed of the sampling RNG. The same seed reproduces the run
    /// bit-for-bit on the same problem instance.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            num_samp: 200,
            max_iter: 300,
            lambda: 4.0,
            seed: 0,
        }
    }
}

impl Settings {
    /// Validate the settings against a problem instance.
    ///
    /// The sampler draws a permutation of the n unknown-indices and uses it
    /// to select observation rows, so `num_samp <= n` and `n <= m` are both
    /// required. This row-selection scheme is inherited deliberately; rows
    /// past index n are never selectable.
    pub fn validate(&self, problem: &ProblemInstance) -> Result<()> {
        let m = problem.num_observations();
        let n = problem.num_unknowns();

        if self.max_iter == 0 {
            return Err(BregmanError::InvalidConfig(
                "max_iter must be at least 1".into(),
            ));
        }
        if self.num_samp == 0 {
            return Err(BregmanError::InvalidConfig(
                "num_samp must be at least 1".into(),
            ));
        }
        if self.num_samp > n {
            return Err(BregmanError::InvalidConfig(format!(
                "num_samp ({}) must not exceed the number of unknowns ({})",
                self.num_samp, n
            )));
        }
        if n > m {
            return Err(BregmanError::InvalidConfig(format!(
                "sampled indices address observation rows, so the number of \
                 unknowns ({}) must not exceed the number of observations ({})",
                n, m
            )));
        }
        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(BregmanError::InvalidConfig(format!(
                "lambda must be finite and non-negative, got {}",
                self.lambda
            )));
        }
        Ok(())
    }
}
