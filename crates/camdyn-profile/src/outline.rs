//! Closed-outline helpers over a synthesized profile.

use camdyn_math::Point2;

use crate::synthesize::ProfilePoint;

/// A cam outline as an ordered point loop.
///
/// Built from a full-revolution profile, whose first and last samples
/// coincide; the duplicate closing sample is kept so indices line up with
/// the profile.
#[derive(Debug, Clone)]
pub struct CamOutline {
    /// Outline vertices in sample order.
    pub points: Vec<Point2>,
}

impl CamOutline {
    /// Create an outline from points.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// The machined cam surface.
    pub fn surface(profile: &[ProfilePoint]) -> Self {
        Self::new(profile.iter().map(ProfilePoint::surface).collect())
    }

    /// The pitch curve (roller-centre path).
    pub fn pitch(profile: &[ProfilePoint]) -> Self {
        Self::new(profile.iter().map(ProfilePoint::pitch).collect())
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Distance between the first and last vertex.
    pub fn closure_gap(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => (b - a).norm(),
            _ => 0.0,
        }
    }

    /// Whether the loop closes within `tolerance`.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        self.points.len() > 2 && self.closure_gap() <= tolerance
    }

    /// Signed area of the loop.
    /// Positive for counter-clockwise, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area / 2.0
    }

    /// Is the loop counter-clockwise?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Length of the closed loop.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            length += (self.points[j] - self.points[i]).norm();
        }
        length
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Largest distance from the cam centre.
    pub fn max_radius(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0, f64::max)
    }

    /// Smallest distance from the cam centre.
    pub fn min_radius(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.coords.norm())
            .reduce(f64::min)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{synthesize_cam_profile, CamGeometry, RotationSense};
    use approx::assert_relative_eq;
    use camdyn_motion::{generate_motion, MotionLaw, MotionSegment};
    use std::f64::consts::PI;

    fn square() -> CamOutline {
        CamOutline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ])
    }

    #[test]
    fn test_square_metrics() {
        let sq = square();
        assert_eq!(sq.signed_area(), 4.0);
        assert!(sq.is_ccw());
        assert_eq!(sq.perimeter(), 8.0);
        let (lo, hi) = sq.bounds().unwrap();
        assert_eq!(lo, Point2::new(0.0, 0.0));
        assert_eq!(hi, Point2::new(2.0, 2.0));
        assert_eq!(sq.min_radius(), 0.0);
        assert!(!sq.is_closed(1e-9));
    }

    #[test]
    fn test_empty_outline() {
        let empty = CamOutline::new(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.bounds().is_none());
        assert_eq!(empty.closure_gap(), 0.0);
        assert_eq!(empty.perimeter(), 0.0);
    }

    #[test]
    fn test_base_circle_outline() {
        let kin = generate_motion(&[MotionSegment::dwell(360.0)], 0.5).unwrap();
        let profile =
            synthesize_cam_profile(&kin, &CamGeometry::translating_roller(40.0, 10.0, 0.0))
                .unwrap();
        let surface = CamOutline::surface(&profile);
        assert!(surface.is_closed(1e-9));
        assert_relative_eq!(surface.perimeter(), 2.0 * PI * 40.0, max_relative = 1e-4);
        assert_relative_eq!(surface.signed_area().abs(), PI * 1600.0, max_relative = 1e-4);
        assert_relative_eq!(CamOutline::pitch(&profile).max_radius(), 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_winding_follows_rotation_sense() {
        let cycle = [
            MotionSegment::new(MotionLaw::Cycloidal, 180.0, 10.0),
            MotionSegment::new(MotionLaw::Cycloidal, 180.0, -10.0),
        ];
        let kin = generate_motion(&cycle, 1.0).unwrap();
        let ccw = CamGeometry::translating_roller(40.0, 10.0, 0.0);
        let cw = ccw.with_rotation(RotationSense::Clockwise);
        let a = CamOutline::surface(&synthesize_cam_profile(&kin, &ccw).unwrap());
        let b = CamOutline::surface(&synthesize_cam_profile(&kin, &cw).unwrap());
        // the outline is traced opposite to the cam's turning direction
        assert!(!a.is_ccw());
        assert!(b.is_ccw());
        assert_relative_eq!(a.max_radius(), 50.0, max_relative = 1e-9);
    }
}
