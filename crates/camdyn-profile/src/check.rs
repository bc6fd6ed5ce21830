//! Evaluate a synthesized profile against design thresholds.
//!
//! Synthesis only computes; deciding whether a cam is acceptable is up to
//! the caller. This module packages the common thresholds.

use camdyn_motion::Peak;
use serde::{Deserialize, Serialize};

use crate::geometry::CamGeometry;
use crate::synthesize::ProfilePoint;

/// Acceptance thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignLimits {
    /// Largest acceptable |pressure angle| (degrees).
    pub max_pressure_angle: f64,
    /// Convex surface radius of curvature must exceed this.
    pub min_radius_of_curvature: f64,
}

impl Default for DesignLimits {
    fn default() -> Self {
        Self {
            max_pressure_angle: 30.0,
            min_radius_of_curvature: 0.0,
        }
    }
}

/// Why a sample fails the limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Violation {
    /// |pressure angle| above the limit.
    PressureAngle {
        /// Cam angle (degrees).
        theta: f64,
        /// Pressure angle (degrees).
        value: f64,
    },
    /// Roller larger than the local pitch curvature: the cutter would
    /// undercut the surface.
    Undercut {
        /// Cam angle (degrees).
        theta: f64,
        /// Surface radius of curvature.
        radius: f64,
    },
    /// Flat-faced surface folds over itself (cusp).
    Cusp {
        /// Cam angle (degrees).
        theta: f64,
        /// Surface radius of curvature.
        radius: f64,
    },
}

/// Summary of a profile against [`DesignLimits`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    /// Pressure angle of largest magnitude.
    pub worst_pressure_angle: Peak,
    /// Smallest radius of curvature over convex stretches.
    pub min_radius_of_curvature: Peak,
    /// Number of samples on concave stretches (roller followers only).
    pub concave_samples: usize,
    /// Every failing sample, in angle order.
    pub violations: Vec<Violation>,
}

impl DesignReport {
    /// No sample violates the limits.
    pub fn passes(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every sample of `profile` against `limits`.
///
/// For roller followers the reported radius is `ρ_pitch − r0`: values in
/// `(−r0, limit]` are undercut, values at or below `−r0` are concave
/// stretches, which a roller can follow.
pub fn check_design(
    profile: &[ProfilePoint],
    geometry: &CamGeometry,
    limits: &DesignLimits,
) -> DesignReport {
    let roller = geometry.follower.is_roller();
    let r0 = if roller { geometry.roller_radius } else { 0.0 };

    let mut worst_pressure_angle = Peak::default();
    let mut min_radius: Option<Peak> = None;
    let mut concave_samples = 0;
    let mut violations = Vec::new();

    for p in profile {
        if p.pressure_angle.abs() > worst_pressure_angle.value.abs() {
            worst_pressure_angle = Peak {
                value: p.pressure_angle,
                theta: p.theta,
            };
        }
        if p.pressure_angle.abs() > limits.max_pressure_angle {
            violations.push(Violation::PressureAngle {
                theta: p.theta,
                value: p.pressure_angle,
            });
        }

        let rho = p.radius_of_curvature;
        if roller && rho + r0 < 0.0 {
            concave_samples += 1;
            continue;
        }
        if min_radius.map_or(true, |m| rho < m.value) {
            min_radius = Some(Peak {
                value: rho,
                theta: p.theta,
            });
        }
        if rho <= limits.min_radius_of_curvature {
            violations.push(if roller {
                Violation::Undercut {
                    theta: p.theta,
                    radius: rho,
                }
            } else {
                Violation::Cusp {
                    theta: p.theta,
                    radius: rho,
                }
            });
        }
    }

    DesignReport {
        worst_pressure_angle,
        min_radius_of_curvature: min_radius.unwrap_or_default(),
        concave_samples,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesize_cam_profile;
    use camdyn_motion::{generate_motion, MotionLaw, MotionSegment};

    fn aggressive() -> Vec<MotionSegment> {
        vec![
            MotionSegment::new(MotionLaw::Cycloidal, 60.0, 30.0),
            MotionSegment::dwell(120.0),
            MotionSegment::new(MotionLaw::Cycloidal, 60.0, -30.0),
            MotionSegment::dwell(120.0),
        ]
    }

    #[test]
    fn test_base_circle_passes() {
        let kin = generate_motion(&[MotionSegment::dwell(360.0)], 1.0).unwrap();
        let g = CamGeometry::translating_roller(40.0, 10.0, 0.0);
        let profile = synthesize_cam_profile(&kin, &g).unwrap();
        let report = check_design(&profile, &g, &DesignLimits::default());
        assert!(report.passes());
        assert_eq!(report.worst_pressure_angle.value, 0.0);
        assert!((report.min_radius_of_curvature.value - 40.0).abs() < 1e-9);
        assert_eq!(report.concave_samples, 0);
    }

    #[test]
    fn test_small_base_circle_fails_pressure_angle() {
        let kin = generate_motion(&aggressive(), 0.5).unwrap();
        let g = CamGeometry::translating_roller(15.0, 5.0, 0.0);
        let profile = synthesize_cam_profile(&kin, &g).unwrap();
        let report = check_design(&profile, &g, &DesignLimits::default());
        assert!(!report.passes());
        assert!(report.worst_pressure_angle.value.abs() > 30.0);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::PressureAngle { .. })));
    }

    #[test]
    fn test_flat_follower_cusp() {
        let kin = generate_motion(&aggressive(), 0.5).unwrap();
        let g = CamGeometry::translating_flat(10.0);
        let profile = synthesize_cam_profile(&kin, &g).unwrap();
        let report = check_design(&profile, &g, &DesignLimits::default());
        assert!(report.min_radius_of_curvature.value < 0.0);
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::Cusp { .. })));
        // flat faces never violate the pressure angle limit
        assert_eq!(report.worst_pressure_angle.value, 0.0);
    }

    #[test]
    fn test_large_roller_undercuts() {
        let kin = generate_motion(&aggressive(), 0.5).unwrap();
        let g = CamGeometry::translating_roller(20.0, 25.0, 0.0);
        let profile = synthesize_cam_profile(&kin, &g).unwrap();
        let report = check_design(
            &profile,
            &g,
            &DesignLimits {
                max_pressure_angle: 90.0,
                ..Default::default()
            },
        );
        assert!(report
            .violations
            .iter()
            .all(|v| matches!(v, Violation::Undercut { .. })));
        assert!(!report.passes());
    }

    #[test]
    fn test_limits_deserialize_defaults() {
        let limits: DesignLimits = serde_json::from_str(r#"{"max_pressure_angle":25.0}"#).unwrap();
        assert_eq!(limits.max_pressure_angle, 25.0);
        assert_eq!(limits.min_radius_of_curvature, 0.0);
    }
}
