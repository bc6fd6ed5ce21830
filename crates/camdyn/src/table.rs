//! Joined kinematic and geometric samples for one design.

use camdyn_math::Point2;
use camdyn_motion::{KinematicExtrema, KinematicPoint, FULL_CYCLE};
use camdyn_profile::{check_design, CamGeometry, CamOutline, DesignLimits, DesignReport, ProfilePoint};
use serde::{Deserialize, Serialize};

/// One row of a cam table: follower kinematics and cam geometry at a
/// single cam angle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SampledPoint {
    /// Cam angle (degrees).
    pub theta: f64,
    /// Follower lift.
    pub displacement: f64,
    /// d(lift)/dθ, θ in radians.
    pub velocity: f64,
    /// d²(lift)/dθ².
    pub acceleration: f64,
    /// d³(lift)/dθ³.
    pub jerk: f64,
    /// Cam surface x in the cam frame.
    pub x: f64,
    /// Cam surface y in the cam frame.
    pub y: f64,
    /// Pressure angle (degrees).
    pub pressure_angle: f64,
    /// Surface radius of curvature, positive where convex; `+∞` on a
    /// straight stretch, which JSON output writes as `null`.
    pub radius_of_curvature: f64,
    /// Pitch curve x in the cam frame.
    pub pitch_x: f64,
    /// Pitch curve y in the cam frame.
    pub pitch_y: f64,
}

impl SampledPoint {
    /// Join index-aligned kinematic and profile samples.
    pub fn join(kin: &KinematicPoint, profile: &ProfilePoint) -> Self {
        Self {
            theta: kin.theta,
            displacement: kin.displacement,
            velocity: kin.velocity,
            acceleration: kin.acceleration,
            jerk: kin.jerk,
            x: profile.x,
            y: profile.y,
            pressure_angle: profile.pressure_angle,
            radius_of_curvature: profile.radius_of_curvature,
            pitch_x: profile.pitch_x,
            pitch_y: profile.pitch_y,
        }
    }

    /// The kinematic half of the row.
    pub fn kinematics(&self) -> KinematicPoint {
        KinematicPoint {
            theta: self.theta,
            displacement: self.displacement,
            velocity: self.velocity,
            acceleration: self.acceleration,
            jerk: self.jerk,
        }
    }

    /// The geometric half of the row.
    pub fn profile(&self) -> ProfilePoint {
        ProfilePoint {
            theta: self.theta,
            x: self.x,
            y: self.y,
            pressure_angle: self.pressure_angle,
            radius_of_curvature: self.radius_of_curvature,
            pitch_x: self.pitch_x,
            pitch_y: self.pitch_y,
        }
    }

    /// Cam surface point.
    pub fn surface(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    fn lerp(&self, next: &Self, t: f64) -> Self {
        Self {
            theta: mix(self.theta, next.theta, t),
            displacement: mix(self.displacement, next.displacement, t),
            velocity: mix(self.velocity, next.velocity, t),
            acceleration: mix(self.acceleration, next.acceleration, t),
            jerk: mix(self.jerk, next.jerk, t),
            x: mix(self.x, next.x, t),
            y: mix(self.y, next.y, t),
            pressure_angle: mix(self.pressure_angle, next.pressure_angle, t),
            radius_of_curvature: mix(self.radius_of_curvature, next.radius_of_curvature, t),
            pitch_x: mix(self.pitch_x, next.pitch_x, t),
            pitch_y: mix(self.pitch_y, next.pitch_y, t),
        }
    }
}

/// Linear blend; an infinite endpoint is taken from the nearer row.
fn mix(a: f64, b: f64, t: f64) -> f64 {
    if a.is_finite() && b.is_finite() {
        a + (b - a) * t
    } else if t < 0.5 {
        a
    } else {
        b
    }
}

/// A fixed-step table of [`SampledPoint`]s covering one revolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamTable {
    /// Sampling resolution (degrees).
    pub step: f64,
    /// Rows in angle order; row `i` is at `i·step` except the last, at 360°.
    pub points: Vec<SampledPoint>,
}

impl CamTable {
    /// Join the outputs of the two stages.
    ///
    /// Both slices come from the same run and are index-aligned; a length
    /// mismatch truncates to the shorter one.
    pub fn from_parts(kinematics: &[KinematicPoint], profile: &[ProfilePoint], step: f64) -> Self {
        let points = kinematics
            .iter()
            .zip(profile)
            .map(|(k, p)| SampledPoint::join(k, p))
            .collect();
        Self { step, points }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Kinematic columns.
    pub fn kinematics(&self) -> Vec<KinematicPoint> {
        self.points.iter().map(SampledPoint::kinematics).collect()
    }

    /// Geometric columns.
    pub fn profile(&self) -> Vec<ProfilePoint> {
        self.points.iter().map(SampledPoint::profile).collect()
    }

    /// The cam surface as a point loop.
    pub fn outline(&self) -> CamOutline {
        CamOutline::new(self.points.iter().map(SampledPoint::surface).collect())
    }

    /// Peak kinematic values.
    pub fn extrema(&self) -> Option<KinematicExtrema> {
        KinematicExtrema::from_points(&self.kinematics())
    }

    /// Check the table against design limits.
    pub fn check(&self, geometry: &CamGeometry, limits: &DesignLimits) -> DesignReport {
        check_design(&self.profile(), geometry, limits)
    }

    /// Every column linearly interpolated at `angle` (degrees).
    ///
    /// Angles outside `[0, 360]` wrap around the revolution. Returns `None`
    /// for a non-finite angle or a table with fewer than two rows.
    pub fn sample_at(&self, angle: f64) -> Option<SampledPoint> {
        if !angle.is_finite() || self.points.len() < 2 || self.step <= 0.0 {
            return None;
        }
        let angle = if (0.0..=FULL_CYCLE).contains(&angle) {
            angle
        } else {
            angle.rem_euclid(FULL_CYCLE)
        };

        // fixed-step rows: the bracket is found directly
        let last = self.points.len() - 2;
        let i = ((angle / self.step).floor() as usize).min(last);
        let (a, b) = (&self.points[i], &self.points[i + 1]);
        let span = b.theta - a.theta;
        if span <= 0.0 || angle <= a.theta {
            return Some(*a);
        }
        if angle >= b.theta {
            return Some(*b);
        }
        Some(a.lerp(b, (angle - a.theta) / span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CamDesign;
    use approx::assert_abs_diff_eq;

    fn table() -> CamTable {
        CamDesign::example().with_step(1.0).evaluate().unwrap()
    }

    #[test]
    fn test_sample_at_grid_point() {
        let t = table();
        let row = t.sample_at(45.0).unwrap();
        assert_eq!(row, t.points[45]);
    }

    #[test]
    fn test_sample_at_midpoint() {
        let t = table();
        let row = t.sample_at(30.5).unwrap();
        let (a, b) = (&t.points[30], &t.points[31]);
        assert_abs_diff_eq!(row.theta, 30.5, epsilon = 1e-12);
        assert_abs_diff_eq!(row.displacement, 0.5 * (a.displacement + b.displacement), epsilon = 1e-12);
        assert_abs_diff_eq!(row.x, 0.5 * (a.x + b.x), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_at_wraps() {
        let t = table();
        let wrapped = t.sample_at(370.25).unwrap();
        let direct = t.sample_at(10.25).unwrap();
        assert_abs_diff_eq!(wrapped.displacement, direct.displacement, epsilon = 1e-9);
        let negative = t.sample_at(-90.0).unwrap();
        assert_abs_diff_eq!(negative.theta, 270.0, epsilon = 1e-9);
        assert_eq!(t.sample_at(360.0).unwrap(), *t.points.last().unwrap());
        assert!(t.sample_at(f64::NAN).is_none());
    }

    #[test]
    fn test_sample_at_short_last_interval() {
        // 360 / 0.7 is not whole: the last row sits less than a step after
        // the previous one
        let t = CamDesign::example().with_step(0.7).evaluate().unwrap();
        assert_eq!(t.len(), 516);
        let row = t.sample_at(359.9).unwrap();
        assert!(row.theta > t.points[514].theta && row.theta < 360.0);
    }

    #[test]
    fn test_mix_keeps_infinite_endpoints() {
        assert_eq!(mix(f64::INFINITY, 3.0, 0.25), f64::INFINITY);
        assert_eq!(mix(f64::INFINITY, 3.0, 0.75), 3.0);
        assert_eq!(mix(1.0, 3.0, 0.5), 2.0);
    }

    #[test]
    fn test_columns_split_back() {
        let t = table();
        let kin = t.kinematics();
        let profile = t.profile();
        assert_eq!(kin.len(), t.len());
        assert_eq!(profile[100].theta, kin[100].theta);
        assert!(t.outline().is_closed(1e-9));
        let extrema = t.extrema().unwrap();
        assert_abs_diff_eq!(extrema.max_displacement.value, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_table_json_roundtrip() {
        let t = table();
        assert!(t.points.iter().all(|p| p.radius_of_curvature.is_finite()));
        let json = serde_json::to_string(&t).unwrap();
        let back: CamTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), t.len());
        assert_eq!(back.step, t.step);
        for (a, b) in t.points.iter().zip(&back.points) {
            assert_abs_diff_eq!(a.theta, b.theta, epsilon = 1e-12);
            assert_abs_diff_eq!(a.displacement, b.displacement, epsilon = 1e-12);
            assert_abs_diff_eq!(a.jerk, b.jerk, epsilon = 1e-9);
            assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-12);
            assert_abs_diff_eq!(a.pressure_angle, b.pressure_angle, epsilon = 1e-12);
            assert_abs_diff_eq!(a.radius_of_curvature, b.radius_of_curvature, epsilon = 1e-9);
            assert_abs_diff_eq!(a.pitch_y, b.pitch_y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_straight_row_serializes_radius_as_null() {
        let row = SampledPoint {
            radius_of_curvature: f64::INFINITY,
            ..SampledPoint::default()
        };
        let value = serde_json::to_value(row).unwrap();
        assert!(value["radius_of_curvature"].is_null());
        assert_eq!(value["theta"], 0.0);
    }

    #[test]
    fn test_empty_table() {
        let t = CamTable::from_parts(&[], &[], 1.0);
        assert!(t.is_empty());
        assert!(t.sample_at(10.0).is_none());
        assert!(t.extrema().is_none());
    }
}
