//! Per-variant iteration state and flip-flop bookkeeping.
//!
//! Each variant owns a primal estimate, a dual (mirror) accumulator, a
//! cumulative sign-vote counter and, for the thresholded modified variant,
//! a permanent elimination flag per coordinate. The counters record a
//! running vote of the preferred update direction; a coordinate whose
//! gradient sign has flip-flopped accumulates votes near zero, and the
//! damped step `t * |votes_j| / i` shrinks accordingly.

use nalgebra::DVector;

use super::shrink::{sign, soft_threshold};

/// State of one variant across iterations.
#[derive(Debug, Clone)]
pub struct VariantState {
    /// Primal estimate x.
    pub(crate) x: DVector<f64>,
    /// Dual/mirror accumulator z.
    pub(crate) z: DVector<f64>,
    /// Cumulative sign(-gradient) votes per coordinate.
    pub(crate) votes: DVector<f64>,
    /// Permanent elimination flags; only the thresholded modified variant
    /// ever sets these.
    pub(crate) eliminated: Vec<bool>,
}

impl VariantState {
    /// Zero-initialized state over `n` coordinates.
    pub fn zeros(n: usize) -> Self {
        VariantState {
            x: DVector::zeros(n),
            z: DVector::zeros(n),
            votes: DVector::zeros(n),
            eliminated: vec![false; n],
        }
    }

    /// The current primal estimate.
    pub fn estimate(&self) -> &DVector<f64> {
        &self.x
    }

    /// The current dual accumulator. Unlike the primal estimate, this
    /// moves every iteration, even while the shrinkage still holds the
    /// estimate at zero.
    pub fn dual(&self) -> &DVector<f64> {
        &self.z
    }

    /// The elimination flags.
    pub fn eliminated(&self) -> &[bool] {
        &self.eliminated
    }

    /// Add this iteration's direction votes: `votes_j += sign(-g_j)`.
    pub(crate) fn accumulate_votes(&mut self, gradient: &DVector<f64>) {
        for (v, g) in self.votes.iter_mut().zip(gradient.iter()) {
            *v += sign(-g);
        }
    }

    /// Flag every not-yet-flagged coordinate whose dual magnitude exceeds
    /// `lambda`. Flags are monotonic: once set they never clear. The test
    /// reads this variant's own dual column.
    pub(crate) fn flag_crossings(&mut self, lambda: f64) {
        for (j, flagged) in self.eliminated.iter_mut().enumerate() {
            if !*flagged && self.z[j].abs() > lambda {
                *flagged = true;
            }
        }
    }

    /// Classic dual update: `z -= step * g` for every coordinate.
    pub(crate) fn plain_update(&mut self, step: f64, gradient: &DVector<f64>) {
        self.z.axpy(-step, gradient, 1.0);
    }

    /// Dual update with the vote-damped step applied to every coordinate:
    /// `z_j -= step * |votes_j| / iter * g_j`.
    pub(crate) fn damped_update(&mut self, step: f64, gradient: &DVector<f64>, iter: usize) {
        let inv_iter = 1.0 / iter as f64;
        for j in 0..self.z.len() {
            let scaled = step * self.votes[j].abs() * inv_iter;
            self.z[j] -= scaled * gradient[j];
        }
    }

    /// Dual update that damps only the flagged coordinates; the rest take
    /// the plain step.
    pub(crate) fn flagged_update(&mut self, step: f64, gradient: &DVector<f64>, iter: usize) {
        let inv_iter = 1.0 / iter as f64;
        for j in 0..self.z.len() {
            let s = if self.eliminated[j] {
                step * self.votes[j].abs() * inv_iter
            } else {
                step
            };
            self.z[j] -= s * gradient[j];
        }
    }

    /// Project the dual accumulator to the sparse primal estimate.
    pub(crate) fn shrink(&mut self, lambda: f64) {
        self.x = soft_threshold(&self.z, lambda);
    }
}
