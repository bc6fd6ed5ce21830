#![warn(missing_docs)]

//! Cam and follower design for camdyn.
//!
//! Provides [`CamDesign`], a serializable description of a cam mechanism
//! (follower geometry plus motion program), and [`CamTable`], the joined
//! per-angle kinematics and cam geometry it evaluates to. The two stages
//! live in `camdyn-motion` and `camdyn-profile` and are re-exported here.
//!
//! # Example
//!
//! ```
//! use camdyn::CamDesign;
//!
//! let design = CamDesign::example();
//! let table = design.evaluate().unwrap();
//! assert_eq!(table.len(), 721);
//!
//! let mid_rise = table.sample_at(60.0).unwrap();
//! assert!((mid_rise.displacement - 10.0).abs() < 1e-9);
//! assert!(table.check(&design.geometry, &design.limits).passes());
//! ```

pub use camdyn_math;
pub use camdyn_motion;
pub use camdyn_profile;

mod design;
mod error;
mod sweep;
mod table;

pub use camdyn_motion::{
    generate_motion, CycleSummary, KinematicExtrema, KinematicPoint, MotionLaw, MotionSegment,
};
pub use camdyn_profile::{
    check_design, synthesize_cam_profile, CamGeometry, CamOutline, DesignLimits, DesignReport,
    FollowerKind, ProfilePoint, RotationSense, Violation,
};
pub use design::CamDesign;
pub use error::{DesignError, Result};
pub use sweep::{
    radius_range, smallest_passing, smallest_passing_base_radius, sweep_base_radius,
    SweepCandidate,
};
pub use table::{CamTable, SampledPoint};
