//! Error types for bregman.

use thiserror::Error;

/// Error type for bregman operations.
#[derive(Debug, Error)]
pub enum BregmanError {
    /// Invalid solver configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Shape mismatch.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Invalid problem specification.
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}

/// Result type for bregman operations.
pub type Result<T> = std::result::Result<T, BregmanError>;
