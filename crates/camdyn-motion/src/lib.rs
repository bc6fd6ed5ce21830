#![warn(missing_docs)]

//! Follower motion law synthesis for camdyn.
//!
//! A cam cycle is an ordered list of [`MotionSegment`]s (dwell, rise and
//! return phases), each driven by one of the closed set of
//! [`MotionLaw`]s. [`generate_motion`] lays the segments out over one
//! revolution and samples displacement, velocity, acceleration, and jerk
//! at a fixed angular step.
//!
//! # Example
//!
//! ```
//! use camdyn_motion::{generate_motion, MotionLaw, MotionSegment};
//!
//! let cycle = [
//!     MotionSegment::new(MotionLaw::Cycloidal, 120.0, 20.0),
//!     MotionSegment::dwell(60.0),
//!     MotionSegment::new(MotionLaw::Polynomial345, 120.0, -20.0),
//!     MotionSegment::dwell(60.0),
//! ];
//!
//! let points = generate_motion(&cycle, 0.5).unwrap();
//! assert_eq!(points.len(), 721);
//! assert_eq!(points.last().unwrap().theta, 360.0);
//! ```

mod error;
mod generate;
mod law;
mod segment;

pub use error::{MotionError, Result};
pub use generate::{generate_motion, sample_count, KinematicExtrema, KinematicPoint, Peak};
pub use law::{LawFactors, MotionLaw};
pub use segment::{layout_segments, CycleSummary, MotionSegment, SegmentSpan};

/// One cam revolution, in degrees.
pub const FULL_CYCLE: f64 = 360.0;
