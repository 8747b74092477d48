//! Solver interface for bregman.
//!
//! This module provides:
//! - Solver settings and configuration validation
//! - Mini-batch sampling of observation rows
//! - The shrinkage operator
//! - Per-variant iteration state with flip-flop bookkeeping
//! - The randomized Linearized Bregman comparison loop

pub mod bregman;
pub mod sampler;
pub mod settings;
pub mod shrink;
pub mod state;

pub use self::bregman::{solve, Solution, Solver};
pub use self::sampler::Sampler;
pub use self::settings::Settings;
pub use self::shrink::{sign, soft_threshold};
