//! Text rendering of variant-indexed diagnostic series.
//!
//! The solver core only produces numbers; this module turns one metric's
//! three series into a labeled side-by-side table. Long runs are
//! sub-sampled so the table stays readable. Rendering images is out of
//! scope.

use std::fmt::Write;

use crate::metrics::MetricsSeries;
use crate::variant::Variant;

/// Maximum number of table rows before sub-sampling kicks in.
const MAX_ROWS: usize = 20;

/// Which diagnostic to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// `‖A_sub·x − y_sub‖₂ / ‖y_sub‖₂`.
    RelativeResidual,
    /// `‖x‖₁`.
    OneNorm,
    /// `‖x_true − x‖₂ / ‖x_true‖₂`.
    ModelError,
}

impl Metric {
    /// Table title for this metric.
    pub fn title(self) -> &'static str {
        match self {
            Metric::RelativeResidual => "Relative residual",
            Metric::OneNorm => "One-norm",
            Metric::ModelError => "Model error",
        }
    }

    fn series(self, metrics: &MetricsSeries, variant: Variant) -> &[f64] {
        match self {
            Metric::RelativeResidual => metrics.relative_residual(variant),
            Metric::OneNorm => metrics.one_norm(variant),
            Metric::ModelError => metrics.model_error(variant),
        }
    }
}

/// Render one metric's three-variant comparison as a text table.
pub fn render_comparison(metric: Metric, metrics: &MetricsSeries) -> String {
    let len = metrics.len();
    let mut out = String::new();

    writeln!(out, "{} ({} iterations)", metric.title(), len).unwrap();
    writeln!(
        out,
        "{:>6}  {:>14}  {:>14}  {:>24}",
        "iter",
        Variant::Classic.label(),
        Variant::Modified.label(),
        Variant::ModifiedNoThreshold.label()
    )
    .unwrap();

    let stride = len.div_ceil(MAX_ROWS).max(1);
    for i in (0..len).step_by(stride).chain(last_row(len, stride)) {
        writeln!(
            out,
            "{:>6}  {:>14.6e}  {:>14.6e}  {:>24.6e}",
            i + 1,
            metric.series(metrics, Variant::Classic)[i],
            metric.series(metrics, Variant::Modified)[i],
            metric.series(metrics, Variant::ModifiedNoThreshold)[i]
        )
        .unwrap();
    }

    out
}

/// The final iteration, if the stride would otherwise skip it.
fn last_row(len: usize, stride: usize) -> Option<usize> {
    if len > 0 && (len - 1) % stride != 0 {
        Some(len - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsSample;

    fn sample(v: f64) -> MetricsSample {
        MetricsSample {
            relative_residual: v,
            one_norm: v,
            model_error: v,
        }
    }

    fn series(len: usize) -> MetricsSeries {
        let mut metrics = MetricsSeries::default();
        for i in 0..len {
            for v in Variant::ALL {
                metrics.record(v, sample(i as f64));
            }
        }
        metrics
    }

    #[test]
    fn table_carries_legend_and_title() {
        let table = render_comparison(Metric::ModelError, &series(3));
        assert!(table.contains("Model error"));
        assert!(table.contains("Classic"));
        assert!(table.contains("Modified"));
        assert!(table.contains("Modified w/out threshold"));
    }

    #[test]
    fn short_runs_render_every_iteration() {
        let table = render_comparison(Metric::OneNorm, &series(5));
        // Header + legend + 5 data rows.
        assert_eq!(table.lines().count(), 7);
    }

    #[test]
    fn long_runs_are_subsampled_but_keep_the_last_row() {
        let table = render_comparison(Metric::RelativeResidual, &series(300));
        assert!(table.lines().count() <= MAX_ROWS + 3);
        assert!(table.lines().last().unwrap().trim_start().starts_with("300"));
    }
}
