//! # bregman
//!
//! A randomized, mini-batch variant of the Linearized Bregman iteration for
//! sparse linear inverse problems (recover a sparse or fast-decaying signal
//! x from noisy linear observations y = Ax), comparing three dual-update
//! policies side by side:
//!
//! - **Classic**: plain adaptive-step update of the dual accumulator.
//! - **Modified**: coordinates whose dual magnitude crosses the shrinkage
//!   threshold are permanently flagged and from then on receive a damped,
//!   vote-weighted step that suppresses sign flip-flopping.
//! - **Modified, no threshold**: the damped step applies to every
//!   coordinate unconditionally.
//!
//! All three variants run every iteration from the *same* random
//! mini-batch, so their metric trajectories are directly comparable.
//!
//! ## Quick Start
//!
//! ```
//! use bregman::prelude::*;
//!
//! let problem = ProblemBuilder::new(100, 50)
//!     .signal(SignalKind::Sparse)
//!     .seed(0)
//!     .build()?;
//!
//! let settings = Settings {
//!     num_samp: 10,
//!     max_iter: 5,
//!     lambda: 4.0,
//!     seed: 0,
//! };
//!
//! let solution = solve(&problem, settings)?;
//! println!(
//!     "{}",
//!     render_comparison(Metric::ModelError, &solution.metrics)
//! );
//! # Ok::<(), BregmanError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Problem generation** builds a synthetic y = Ax instance with known
//!   ground truth ([`problem`]).
//! - **The solver loop** draws a shared mini-batch, computes per-variant
//!   residuals, gradients and Barzilai-Borwein-style step sizes, applies
//!   each variant's dual update and the soft-threshold shrinkage, and
//!   appends per-iteration diagnostics ([`solver`], [`metrics`]).
//! - **Reporting** renders a labeled text comparison of the three variants
//!   ([`report`]).
//!
//! Execution is single-threaded and strictly sequential across iterations;
//! fixing the problem and sampler seeds makes a run bit-reproducible.

pub mod error;
pub mod metrics;
pub mod problem;
pub mod report;
pub mod solver;
pub mod variant;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use bregman::prelude::*;
/// ```
pub mod prelude {
    // Problem
    pub use crate::problem::{ProblemBuilder, ProblemInstance, SignalKind};

    // Solver
    pub use crate::solver::{solve, soft_threshold, Sampler, Settings, Solution, Solver};

    // Variants and diagnostics
    pub use crate::metrics::{MetricsSample, MetricsSeries};
    pub use crate::variant::Variant;

    // Reporting
    pub use crate::report::{render_comparison, Metric};

    // Errors
    pub use crate::error::{BregmanError, Result};
}

// Re-export main types at crate root
pub use error::{BregmanError, Result};
pub use problem::{ProblemBuilder, ProblemInstance, SignalKind};
pub use solver::{solve, Settings, Solution, Solver};
pub use variant::Variant;
