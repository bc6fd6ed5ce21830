#![warn(missing_docs)]

//! Cam outline synthesis by kinematic inversion.
//!
//! Given a sampled follower motion (from `camdyn-motion`) and static
//! [`CamGeometry`], [`synthesize_cam_profile`] holds the cam still, sweeps
//! the follower backwards through the cycle, and reports at every sample
//! the cam surface point in the cam's rotating frame together with the
//! pressure angle and the surface radius of curvature.
//!
//! Four follower kinds are supported: translating and oscillating, each
//! with a roller or a flat face.
//!
//! # Example
//!
//! ```
//! use camdyn_motion::{generate_motion, MotionLaw, MotionSegment};
//! use camdyn_profile::{synthesize_cam_profile, CamGeometry, CamOutline};
//!
//! let cycle = [
//!     MotionSegment::new(MotionLaw::Cycloidal, 150.0, 15.0),
//!     MotionSegment::dwell(30.0),
//!     MotionSegment::new(MotionLaw::Cycloidal, 150.0, -15.0),
//!     MotionSegment::dwell(30.0),
//! ];
//! let kinematics = generate_motion(&cycle, 0.5).unwrap();
//!
//! let geometry = CamGeometry::translating_roller(40.0, 10.0, 0.0);
//! let profile = synthesize_cam_profile(&kinematics, &geometry).unwrap();
//!
//! assert_eq!(profile.len(), kinematics.len());
//! assert!(CamOutline::surface(&profile).is_closed(1e-9));
//! ```

mod check;
mod error;
pub mod follower;
mod geometry;
pub mod metrics;
mod outline;
mod synthesize;

pub use check::{check_design, DesignLimits, DesignReport, Violation};
pub use error::{ProfileError, Result};
pub use follower::{Contact, SolvedGeometry};
pub use geometry::{CamGeometry, FollowerKind, RotationSense};
pub use outline::CamOutline;
pub use synthesize::{cam_frame, synthesize_cam_profile, ProfilePoint};
