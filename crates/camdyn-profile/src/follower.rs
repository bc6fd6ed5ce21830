//! Per-follower home-frame contact geometry.
//!
//! Each [`FollowerKind`] maps to one function producing the follower's
//! reference point in its home frame at a sampled angle. The home frame is
//! the same for either rotation sense. Roller variants
//! hand back the roller-centre trajectory with its θ-derivatives, which
//! the shared procedure in [`crate::metrics`] turns into pressure angle and
//! curvature. Flat-faced variants hand back the envelope contact point
//! with a closed-form curvature.

use camdyn_math::{clamped_acos, clamped_sqrt, Vec2, EPSILON};
use camdyn_motion::KinematicPoint;
use tracing::{debug, warn};

use crate::geometry::{CamGeometry, FollowerKind};

/// Follower contact state in the home frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Roller centre trajectory and its θ-derivatives.
    Roller {
        /// Roller centre.
        centre: Vec2,
        /// d(centre)/dθ.
        velocity: Vec2,
        /// d²(centre)/dθ².
        acceleration: Vec2,
        /// Unit direction the follower guides the roller centre along.
        constraint: Vec2,
    },
    /// Flat face touching the cam.
    Flat {
        /// Contact point on the face.
        point: Vec2,
        /// Unit face normal pointing away from the cam.
        normal: Vec2,
        /// Unit direction of the face's motion at the contact point.
        constraint: Vec2,
        /// Radius of curvature of the cam surface at the contact point.
        radius_of_curvature: f64,
    },
}

/// Geometry with its once-per-run reference quantity solved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedGeometry {
    /// The input geometry.
    pub geometry: CamGeometry,
    /// Prime-circle radius `Rp` (translating roller), `rb` (translating
    /// flat), or reference arm angle `φ0` in radians (oscillating).
    pub reference: f64,
    /// Inversion rotation sign, see [`crate::RotationSense::inversion_sign`].
    pub sign: f64,
}

type HomeFrameFn = fn(&SolvedGeometry, &KinematicPoint) -> Contact;

impl FollowerKind {
    fn home_frame(self) -> HomeFrameFn {
        match self {
            FollowerKind::TranslatingRoller => translating_roller,
            FollowerKind::TranslatingFlat => translating_flat,
            FollowerKind::OscillatingRoller => oscillating_roller,
            FollowerKind::OscillatingFlat => oscillating_flat,
        }
    }
}

impl SolvedGeometry {
    /// Solve the reference quantity for `geometry`.
    pub fn solve(geometry: &CamGeometry) -> Self {
        let g = geometry;
        let reference = match g.follower {
            FollowerKind::TranslatingRoller => {
                let r = g.base_radius + g.roller_radius;
                if g.offset.abs() > r {
                    warn!(offset = g.offset, prime = r, "offset exceeds prime circle; clamped");
                }
                clamped_sqrt(r * r - g.offset * g.offset)
            }
            FollowerKind::TranslatingFlat => g.base_radius,
            FollowerKind::OscillatingRoller => {
                let (r1, r3) = (g.pivot_distance, g.arm_length);
                let r = g.base_radius + g.roller_radius;
                let denom = 2.0 * r1 * r3;
                if denom.abs() < EPSILON {
                    warn!(r1, r3, "degenerate arm triangle; reference angle set to 0");
                    0.0
                } else {
                    let c = (r1 * r1 + r3 * r3 - r * r) / denom;
                    if c.abs() > 1.0 {
                        warn!(cos = c, "arm triangle cannot close; clamped");
                    }
                    clamped_acos(c)
                }
            }
            FollowerKind::OscillatingFlat => {
                let (r1, rb) = (g.pivot_distance, g.base_radius);
                let denom = rb + g.offset;
                let ae = if denom.abs() < EPSILON {
                    warn!(rb, offset = g.offset, "degenerate face offset; reference angle set to 90°");
                    0.0
                } else {
                    r1 * rb / denom
                };
                let de = clamped_sqrt(ae * ae - rb * rb);
                rb.atan2(de)
            }
        };
        debug!(follower = %g.follower, reference, "reference geometry solved");
        Self {
            geometry: *geometry,
            reference,
            sign: g.rotation.inversion_sign(),
        }
    }

    /// Home-frame contact state at one sampled angle.
    pub fn contact(&self, kin: &KinematicPoint) -> Contact {
        (self.geometry.follower.home_frame())(self, kin)
    }
}

fn translating_roller(solved: &SolvedGeometry, kin: &KinematicPoint) -> Contact {
    Contact::Roller {
        centre: Vec2::new(solved.reference + kin.displacement, -solved.geometry.offset),
        velocity: Vec2::new(kin.velocity, 0.0),
        acceleration: Vec2::new(kin.acceleration, 0.0),
        constraint: Vec2::x(),
    }
}

fn translating_flat(solved: &SolvedGeometry, kin: &KinematicPoint) -> Contact {
    // envelope of the face x = rb + s: the contact slides by σ·v along the face
    Contact::Flat {
        point: Vec2::new(solved.reference + kin.displacement, solved.sign * kin.velocity),
        normal: Vec2::x(),
        constraint: Vec2::x(),
        radius_of_curvature: solved.reference + kin.displacement + kin.acceleration,
    }
}

/// Arm angle and its θ-derivatives, all in radians; lift is in degrees.
fn arm_angle(solved: &SolvedGeometry, kin: &KinematicPoint) -> (f64, f64, f64) {
    (
        solved.reference + kin.displacement.to_radians(),
        kin.velocity.to_radians(),
        kin.acceleration.to_radians(),
    )
}

fn oscillating_roller(solved: &SolvedGeometry, kin: &KinematicPoint) -> Contact {
    let (r1, r3) = (solved.geometry.pivot_distance, solved.geometry.arm_length);
    let (phi, d1, d2) = arm_angle(solved, kin);
    let (s, c) = phi.sin_cos();
    // tangent to the roller-centre circle about the pivot
    let along = Vec2::new(s, c);
    let inward = Vec2::new(c, -s);
    Contact::Roller {
        centre: Vec2::new(r1 - r3 * c, r3 * s),
        velocity: r3 * d1 * along,
        acceleration: r3 * d2 * along + r3 * d1 * d1 * inward,
        constraint: along,
    }
}

fn oscillating_flat(solved: &SolvedGeometry, kin: &KinematicPoint) -> Contact {
    let g = &solved.geometry;
    let (r1, e) = (g.pivot_distance, g.offset);
    let (phi, d1, d2) = arm_angle(solved, kin);
    let (s, c) = phi.sin_cos();

    let normal = Vec2::new(s, c);
    let along_face = Vec2::new(-c, s);
    let support = r1 * s - e;

    // the face normal turns at σ - φ' relative to the cam
    let sign = solved.sign;
    let k = sign - d1;
    let (slide, radius_of_curvature) = if k.abs() < EPSILON {
        (0.0, 0.0)
    } else {
        let slide = r1 * c * d1 / k;
        let rho = support + r1 * (sign * c * d2 - s * d1 * d1 * k) / (k * k * k);
        (slide, rho)
    };
    let point = support * normal + slide * along_face;

    // the arm rotates the contact point about the pivot at (r1, 0)
    let arm = point - Vec2::new(r1, 0.0);
    let swing = Vec2::new(arm.y, -arm.x);
    let constraint = if swing.norm() > EPSILON {
        swing.normalize()
    } else {
        normal
    };

    Contact::Flat {
        point,
        normal,
        constraint,
        radius_of_curvature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RotationSense;
    use approx::assert_abs_diff_eq;

    fn rest() -> KinematicPoint {
        KinematicPoint::at_rest(0.0, 0.0)
    }

    #[test]
    fn test_prime_radius() {
        let solved = SolvedGeometry::solve(&CamGeometry::translating_roller(40.0, 10.0, 30.0));
        assert_abs_diff_eq!(solved.reference, 40.0, epsilon = 1e-12);
        let clamped = SolvedGeometry::solve(&CamGeometry::translating_roller(10.0, 0.0, 30.0));
        assert_eq!(clamped.reference, 0.0);
    }

    #[test]
    fn test_oscillating_roller_closes_on_prime_circle() {
        let g = CamGeometry::oscillating_roller(40.0, 10.0, 100.0, 80.0);
        let solved = SolvedGeometry::solve(&g);
        match solved.contact(&rest()) {
            Contact::Roller { centre, constraint, .. } => {
                assert_abs_diff_eq!(centre.norm(), 50.0, epsilon = 1e-9);
                assert_abs_diff_eq!(constraint.norm(), 1.0, epsilon = 1e-12);
            }
            other => panic!("expected roller contact, got {other:?}"),
        }
    }

    #[test]
    fn test_oscillating_roller_degenerate_triangle() {
        let g = CamGeometry::oscillating_roller(40.0, 10.0, 0.0, 80.0);
        assert_eq!(SolvedGeometry::solve(&g).reference, 0.0);
        // unreachable prime circle clamps instead of producing NaN
        let far = CamGeometry::oscillating_roller(40.0, 10.0, 300.0, 20.0);
        assert!(SolvedGeometry::solve(&far).reference.is_finite());
    }

    #[test]
    fn test_oscillating_flat_touches_base_circle() {
        let g = CamGeometry::oscillating_flat(30.0, 120.0, 6.0);
        let solved = SolvedGeometry::solve(&g);
        // sin φ0 = (rb + e) / r1
        assert_abs_diff_eq!(solved.reference.sin(), 36.0 / 120.0, epsilon = 1e-12);
        match solved.contact(&rest()) {
            Contact::Flat {
                point,
                radius_of_curvature,
                ..
            } => {
                assert_abs_diff_eq!(point.norm(), 30.0, epsilon = 1e-9);
                assert_abs_diff_eq!(radius_of_curvature, 30.0, epsilon = 1e-9);
            }
            other => panic!("expected flat contact, got {other:?}"),
        }
    }

    #[test]
    fn test_oscillating_flat_face_through_pivot_has_no_pressure_angle_offset() {
        let g = CamGeometry::oscillating_flat(30.0, 120.0, 0.0);
        let solved = SolvedGeometry::solve(&g);
        let kin = KinematicPoint {
            theta: 40.0,
            displacement: 4.0,
            velocity: 6.0,
            acceleration: -3.0,
            jerk: 0.0,
        };
        match solved.contact(&kin) {
            Contact::Flat {
                normal, constraint, ..
            } => {
                assert_abs_diff_eq!(normal.dot(&constraint).abs(), 1.0, epsilon = 1e-9);
            }
            other => panic!("expected flat contact, got {other:?}"),
        }
    }

    #[test]
    fn test_translating_flat_curvature_identity() {
        let solved = SolvedGeometry::solve(&CamGeometry::translating_flat(25.0));
        let kin = KinematicPoint {
            theta: 10.0,
            displacement: 3.0,
            velocity: 4.0,
            acceleration: -7.5,
            jerk: 1.0,
        };
        match solved.contact(&kin) {
            Contact::Flat {
                point,
                radius_of_curvature,
                ..
            } => {
                assert_eq!(point, Vec2::new(28.0, -4.0));
                assert_eq!(radius_of_curvature, 25.0 + 3.0 + -7.5);
            }
            other => panic!("expected flat contact, got {other:?}"),
        }

        // turning the other way the contact slides to the other side
        let cw = CamGeometry::translating_flat(25.0).with_rotation(RotationSense::Clockwise);
        match SolvedGeometry::solve(&cw).contact(&kin) {
            Contact::Flat {
                point,
                radius_of_curvature,
                ..
            } => {
                assert_eq!(point, Vec2::new(28.0, 4.0));
                assert_eq!(radius_of_curvature, 25.0 + 3.0 + -7.5);
            }
            other => panic!("expected flat contact, got {other:?}"),
        }
    }

    #[test]
    fn test_solved_sign_follows_rotation() {
        let g = CamGeometry::translating_roller(40.0, 10.0, 8.0);
        assert_eq!(SolvedGeometry::solve(&g).sign, -1.0);
        let cw = g.with_rotation(RotationSense::Clockwise);
        let solved = SolvedGeometry::solve(&cw);
        assert_eq!(solved.sign, 1.0);
        // the home-frame roller centre keeps the offset on the same side
        match solved.contact(&rest()) {
            Contact::Roller { centre, .. } => {
                assert_abs_diff_eq!(centre.x, (2500.0f64 - 64.0).sqrt(), epsilon = 1e-12);
                assert_eq!(centre.y, -8.0);
            }
            other => panic!("expected roller contact, got {other:?}"),
        }
    }
}
