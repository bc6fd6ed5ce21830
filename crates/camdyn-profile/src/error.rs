//! Error types for profile synthesis.

use thiserror::Error;

/// Errors that can occur during cam profile synthesis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// Base radius is negative.
    #[error("base radius must not be negative, got {0}")]
    NegativeBaseRadius(f64),

    /// A geometry field is out of its static domain.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
