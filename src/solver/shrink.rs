//! Shrinkage operator and sign helper.

use nalgebra::DVector;

/// Soft-threshold (shrinkage) operator, the proximal operator of the L1
/// norm: `sign(z) * max(|z| - lambda, 0)`, elementwise.
///
/// At `lambda = 0` this is the identity; at `|z| = lambda` the result is
/// exactly zero.
pub fn soft_threshold(z: &DVector<f64>, lambda: f64) -> DVector<f64> {
    z.map(|v| {
        if v > lambda {
            v - lambda
        } else if v < -lambda {
            v + lambda
        } else {
            0.0
        }
    })
}

/// Sign with `sign(0) = 0`, matching the convention the vote counters need.
///
/// `f64::signum` maps +0.0 to 1.0, which would cast a vote for coordinates
/// the gradient does not touch.
pub fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
