//! Error types for motion generation.

use thiserror::Error;

/// Errors that can occur while sampling a motion cycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// The angular sampling step is zero, negative, not finite, or too
    /// small for the sample count to fit in `usize`.
    #[error("angular step must be positive and finite, got {0}")]
    InvalidStep(f64),
}

/// Result type for motion operations.
pub type Result<T> = std::result::Result<T, MotionError>;
