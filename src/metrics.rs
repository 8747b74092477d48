//! Per-iteration diagnostic series.
//!
//! The solver appends one sample per variant per iteration; nothing is ever
//! overwritten, so a blow-up shows through as non-finite values in the
//! series instead of an error.

use crate::variant::Variant;

/// One recorded sample for a single variant in a single iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSample {
    /// `‖A_sub·x − y_sub‖₂ / ‖y_sub‖₂` on the iteration's mini-batch.
    pub relative_residual: f64,
    /// `‖x‖₁` of the primal estimate.
    pub one_norm: f64,
    /// `‖x_true − x‖₂ / ‖x_true‖₂` against the ground truth.
    pub model_error: f64,
}

/// Append-only per-variant time series of solver diagnostics.
#[derive(Debug, Clone, Default)]
pub struct MetricsSeries {
    relative_residual: [Vec<f64>; 3],
    one_norm: [Vec<f64>; 3],
    model_error: [Vec<f64>; 3],
}

impl MetricsSeries {
    /// Empty series, optionally pre-allocated for `max_iter` iterations.
    pub fn with_capacity(max_iter: usize) -> Self {
        let make = || {
            [
                Vec::with_capacity(max_iter),
                Vec::with_capacity(max_iter),
                Vec::with_capacity(max_iter),
            ]
        };
        MetricsSeries {
            relative_residual: make(),
            one_norm: make(),
            model_error: make(),
        }
    }

    /// Append one sample for a variant.
    pub fn record(&mut self, variant: Variant, sample: MetricsSample) {
        let i = variant.index();
        self.relative_residual[i].push(sample.relative_residual);
        self.one_norm[i].push(sample.one_norm);
        self.model_error[i].push(sample.model_error);
    }

    /// Number of recorded iterations (same for every variant after a run).
    pub fn len(&self) -> usize {
        self.relative_residual[0].len()
    }

    /// True if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Relative-residual series of a variant.
    pub fn relative_residual(&self, variant: Variant) -> &[f64] {
        &self.relative_residual[variant.index()]
    }

    /// One-norm series of a variant.
    pub fn one_norm(&self, variant: Variant) -> &[f64] {
        &self.one_norm[variant.index()]
    }

    /// Relative model-error series of a variant.
    pub fn model_error(&self, variant: Variant) -> &[f64] {
        &self.model_error[variant.index()]
    }
}
