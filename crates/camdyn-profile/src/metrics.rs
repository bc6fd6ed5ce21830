//! Shared differentiation procedure for pressure angle and curvature.
//!
//! A home-frame point `P(θ)` is carried into the cam frame by
//! `Q(θ) = R(σθ)·P(θ)`, with `σ = -1` for a cam turning counter-clockwise
//! and `σ = +1` for one turning clockwise. Then
//!
//! ```text
//! Q'  = R(σθ)·(P' + σ·J·P)
//! Q'' = R(σθ)·(P'' + 2σ·J·P' - P)
//! ```
//!
//! where `J` is the +90° rotation. Curvature and normals are rotation
//! invariant, so they are evaluated on the bracketed home-frame vectors.

use camdyn_math::{cross, perp, signed_angle, Vec2, EPSILON};

/// Tangent of the cam-fixed trajectory, expressed in the home frame.
pub fn relative_tangent(point: &Vec2, velocity: &Vec2, sign: f64) -> Vec2 {
    velocity + sign * perp(point)
}

/// Second derivative of the cam-fixed trajectory, in the home frame.
pub fn relative_curvature_vector(
    point: &Vec2,
    velocity: &Vec2,
    acceleration: &Vec2,
    sign: f64,
) -> Vec2 {
    acceleration + 2.0 * sign * perp(velocity) - point
}

/// Outward unit normal of the cam-fixed trajectory, `None` where the
/// tangent vanishes.
pub fn outward_normal(tangent: &Vec2, sign: f64) -> Option<Vec2> {
    let len = tangent.norm();
    (len > EPSILON).then(|| -sign * perp(tangent) / len)
}

/// Signed radius of curvature, positive where the curve is convex as seen
/// from the cam centre.
///
/// A vanishing tangent yields 0; a straight stretch yields `+∞`.
pub fn signed_radius(tangent: &Vec2, second: &Vec2, sign: f64) -> f64 {
    let speed = tangent.norm();
    if speed < EPSILON {
        return 0.0;
    }
    let k = cross(tangent, second);
    if k.abs() < EPSILON {
        return f64::INFINITY;
    }
    // the cam-fixed curve runs against the cam's rotation
    sign * speed * speed * speed / k
}

/// Pressure angle in degrees between the direction the follower is
/// constrained to move and the line of force, measured in the cam's sense
/// of rotation.
pub fn pressure_angle(constraint: &Vec2, force: &Vec2, sign: f64) -> f64 {
    -sign * signed_angle(constraint, force).to_degrees()
}
