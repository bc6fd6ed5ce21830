//! Error types for design evaluation.

use camdyn_motion::MotionError;
use camdyn_profile::ProfileError;
use thiserror::Error;

/// Errors that can occur while loading or evaluating a cam design.
#[derive(Error, Debug)]
pub enum DesignError {
    /// Motion generation rejected its input.
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// Profile synthesis rejected its input.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The design file is not valid TOML or does not match the schema.
    #[error("failed to parse design: {0}")]
    Parse(#[from] toml::de::Error),

    /// The design could not be rendered as TOML.
    #[error("failed to serialize design: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// IO error while reading a design file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Sweep parameters are unusable.
    #[error("invalid sweep: {0}")]
    InvalidSweep(String),
}

/// Result type for design operations.
pub type Result<T> = std::result::Result<T, DesignError>;
