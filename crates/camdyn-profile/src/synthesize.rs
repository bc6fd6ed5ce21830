//! Kinematic inversion: from follower motion to cam outline.

use camdyn_math::{Point2, Transform2, Vec2};
use camdyn_motion::KinematicPoint;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::follower::{Contact, SolvedGeometry};
use crate::geometry::CamGeometry;
use crate::metrics::{
    outward_normal, pressure_angle, relative_curvature_vector, relative_tangent, signed_radius,
};

/// Cam outline and validity metrics at one sampled angle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Cam angle θ (degrees), copied from the kinematic sample.
    pub theta: f64,
    /// Cam surface X in the cam's rotating frame.
    pub x: f64,
    /// Cam surface Y in the cam's rotating frame.
    pub y: f64,
    /// Pressure angle (degrees).
    pub pressure_angle: f64,
    /// Radius of curvature of the cam surface; positive where convex.
    pub radius_of_curvature: f64,
    /// Pitch curve X (roller centre; equals `x` for flat faces).
    pub pitch_x: f64,
    /// Pitch curve Y (roller centre; equals `y` for flat faces).
    pub pitch_y: f64,
}

impl ProfilePoint {
    /// Cam surface point.
    pub fn surface(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Pitch curve point.
    pub fn pitch(&self) -> Point2 {
        Point2::new(self.pitch_x, self.pitch_y)
    }
}

/// Home-frame result before placement on the cam.
struct HomeSample {
    surface: Vec2,
    pitch: Vec2,
    pressure_angle: f64,
    radius_of_curvature: f64,
}

fn evaluate_contact(contact: Contact, roller_radius: f64, sign: f64) -> HomeSample {
    match contact {
        Contact::Roller {
            centre,
            velocity,
            acceleration,
            constraint,
        } => {
            let tangent = relative_tangent(&centre, &velocity, sign);
            let second = relative_curvature_vector(&centre, &velocity, &acceleration, sign);
            let pitch_radius = signed_radius(&tangent, &second, sign);
            match outward_normal(&tangent, sign) {
                Some(normal) => HomeSample {
                    surface: centre - roller_radius * normal,
                    pitch: centre,
                    pressure_angle: pressure_angle(&constraint, &normal, sign),
                    radius_of_curvature: pitch_radius - roller_radius,
                },
                None => HomeSample {
                    surface: centre,
                    pitch: centre,
                    pressure_angle: 0.0,
                    radius_of_curvature: pitch_radius - roller_radius,
                },
            }
        }
        Contact::Flat {
            point,
            normal,
            constraint,
            radius_of_curvature,
        } => HomeSample {
            surface: point,
            pitch: point,
            pressure_angle: pressure_angle(&constraint, &normal, sign),
            radius_of_curvature,
        },
    }
}

/// Transform taking home-frame coordinates at cam angle `theta` (degrees)
/// to the cam's rotating frame.
///
/// The inversion rotates by `-θ` for a cam turning counter-clockwise and
/// by `+θ` for one turning clockwise; the outline is then turned by
/// `start_angle`.
pub fn cam_frame(geometry: &CamGeometry, theta: f64) -> Transform2 {
    let sign = geometry.rotation.inversion_sign();
    let placed = Transform2::rotation(sign * theta.to_radians());
    if geometry.start_angle == 0.0 {
        placed
    } else {
        Transform2::rotation(geometry.start_angle.to_radians()).then(&placed)
    }
}

/// Compute the cam outline, pressure angle, and radius of curvature at
/// every kinematic sample.
///
/// The output is index-aligned with `kinematics`. Only a geometry that
/// violates its static contract (see [`CamGeometry::validate`]) is an
/// error; degenerate configurations yield defined values.
pub fn synthesize_cam_profile(
    kinematics: &[KinematicPoint],
    geometry: &CamGeometry,
) -> Result<Vec<ProfilePoint>> {
    geometry.validate()?;
    let solved = SolvedGeometry::solve(geometry);
    debug!(
        follower = %geometry.follower,
        samples = kinematics.len(),
        rotation = ?geometry.rotation,
        "synthesizing cam profile"
    );

    let roller_radius = if geometry.follower.is_roller() {
        geometry.roller_radius
    } else {
        0.0
    };

    let points = kinematics
        .iter()
        .map(|kin| {
            let home = evaluate_contact(solved.contact(kin), roller_radius, solved.sign);
            let frame = cam_frame(geometry, kin.theta);
            let surface = frame.apply_point(&Point2::from(home.surface));
            let pitch = frame.apply_point(&Point2::from(home.pitch));
            ProfilePoint {
                theta: kin.theta,
                x: surface.x,
                y: surface.y,
                pressure_angle: home.pressure_angle,
                radius_of_curvature: home.radius_of_curvature,
                pitch_x: pitch.x,
                pitch_y: pitch.y,
            }
        })
        .collect();

    Ok(points)
}
