#![warn(missing_docs)]

//! Planar math types for the camdyn cam design engine.
//!
//! Thin wrappers around nalgebra providing the 2D types used by the
//! motion and profile crates: points, vectors, a planar rigid transform,
//! and guarded inverse-trigonometric helpers.

use nalgebra::{Matrix3, Vector2, Vector3};

/// A point in the plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the plane.
pub type Vec2 = Vector2<f64>;

/// Tolerance used to absorb floating round-off in angle and length tests.
pub const EPSILON: f64 = 1e-9;

/// Rotate `v` by +90° (the planar operator `J`: `(x, y) -> (-y, x)`).
#[inline]
pub fn perp(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Scalar (z component of the) cross product `a × b`.
#[inline]
pub fn cross(a: &Vec2, b: &Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Signed angle (radians, in `(-π, π]`) that takes direction `from` onto `to`.
///
/// Returns 0 when either vector is degenerate.
pub fn signed_angle(from: &Vec2, to: &Vec2) -> f64 {
    let c = from.dot(to);
    let s = cross(from, to);
    if s == 0.0 && c == 0.0 {
        return 0.0;
    }
    s.atan2(c)
}

/// `acos` with its argument clamped into `[-1, 1]`.
#[inline]
pub fn clamped_acos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos()
}

/// `sqrt` of `max(0, x)`.
#[inline]
pub fn clamped_sqrt(x: f64) -> f64 {
    x.max(0.0).sqrt()
}

/// A planar rigid transformation stored as a 3x3 homogeneous matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// The underlying 3x3 matrix.
    pub matrix: Matrix3<f64>,
}

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Counter-clockwise rotation about the origin by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix3::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform2) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        let v = self.matrix * Vector3::new(p.x, p.y, 1.0);
        Point2::new(v.x, v.y)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec2) -> Vec2 {
        let r = self.matrix * Vector3::new(v.x, v.y, 0.0);
        Vec2::new(r.x, r.y)
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}
