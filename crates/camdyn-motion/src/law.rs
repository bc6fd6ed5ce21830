//! Normalized motion-law kernels.
//!
//! Each law maps normalized segment time `u ∈ [0, 1]` to four shape
//! factors: displacement `σ(u)` and its first three derivatives with
//! respect to `u`. Physical scaling by lift and segment duration happens in
//! [`SegmentSpan::evaluate`](crate::SegmentSpan::evaluate).

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of supported follower motion laws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionLaw {
    /// Follower at rest; lift does not change.
    #[default]
    Dwell,
    /// Constant velocity.
    Uniform,
    /// Constant acceleration then constant deceleration.
    Parabolic,
    /// Half-period cosine.
    #[serde(alias = "harmonic")]
    SimpleHarmonic,
    /// Cycloid; zero velocity and acceleration at both ends.
    Cycloidal,
    /// 3-4-5 polynomial; zero velocity and acceleration at both ends.
    #[serde(alias = "poly345")]
    Polynomial345,
}

/// Normalized shape factors `(σ, σ′, σ″, σ‴)` of a law at one `u`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LawFactors {
    /// σ(u)
    pub displacement: f64,
    /// σ′(u)
    pub velocity: f64,
    /// σ″(u)
    pub acceleration: f64,
    /// σ‴(u)
    pub jerk: f64,
}

impl LawFactors {
    fn new(displacement: f64, velocity: f64, acceleration: f64, jerk: f64) -> Self {
        Self {
            displacement,
            velocity,
            acceleration,
            jerk,
        }
    }
}

impl MotionLaw {
    /// Every law, in declaration order.
    pub const ALL: [MotionLaw; 6] = [
        MotionLaw::Dwell,
        MotionLaw::Uniform,
        MotionLaw::Parabolic,
        MotionLaw::SimpleHarmonic,
        MotionLaw::Cycloidal,
        MotionLaw::Polynomial345,
    ];

    /// Evaluate the normalized shape factors at `u` (clamped into `[0, 1]`).
    pub fn evaluate(self, u: f64) -> LawFactors {
        let u = u.clamp(0.0, 1.0);
        match self {
            MotionLaw::Dwell => LawFactors::default(),
            MotionLaw::Uniform => LawFactors::new(u, 1.0, 0.0, 0.0),
            MotionLaw::Parabolic => {
                if u <= 0.5 {
                    LawFactors::new(2.0 * u * u, 4.0 * u, 4.0, 0.0)
                } else {
                    let w = 1.0 - u;
                    LawFactors::new(1.0 - 2.0 * w * w, 4.0 * w, -4.0, 0.0)
                }
            }
            MotionLaw::SimpleHarmonic => {
                let (s, c) = (PI * u).sin_cos();
                LawFactors::new(
                    0.5 * (1.0 - c),
                    0.5 * PI * s,
                    0.5 * PI * PI * c,
                    -0.5 * PI * PI * PI * s,
                )
            }
            MotionLaw::Cycloidal => {
                let (s, c) = (2.0 * PI * u).sin_cos();
                LawFactors::new(
                    u - s / (2.0 * PI),
                    1.0 - c,
                    2.0 * PI * s,
                    4.0 * PI * PI * c,
                )
            }
            MotionLaw::Polynomial345 => {
                let u2 = u * u;
                let u3 = u2 * u;
                LawFactors::new(
                    u3 * (10.0 - 15.0 * u + 6.0 * u2),
                    30.0 * u2 * (1.0 - 2.0 * u + u2),
                    60.0 * u - 180.0 * u2 + 120.0 * u3,
                    60.0 - 360.0 * u + 360.0 * u2,
                )
            }
        }
    }

    /// Number of successive derivatives (velocity, acceleration, jerk)
    /// that vanish at both ends of the segment.
    ///
    /// Two segments joined end to end are continuous up to the smaller of
    /// their two orders; see [`MotionLaw::joint_order`].
    pub fn zero_boundary_derivatives(self) -> u8 {
        match self {
            MotionLaw::Dwell => 3,
            MotionLaw::Uniform => 0,
            MotionLaw::Parabolic | MotionLaw::SimpleHarmonic => 1,
            MotionLaw::Cycloidal | MotionLaw::Polynomial345 => 2,
        }
    }

    /// Highest derivative order that stays continuous across a joint from
    /// `self` into `next` (0: displacement only, 1: velocity, 2: acceleration).
    pub fn joint_order(self, next: MotionLaw) -> u8 {
        self.zero_boundary_derivatives()
            .min(next.zero_boundary_derivatives())
    }

    /// Whether the law changes the lift (everything except [`MotionLaw::Dwell`]).
    pub fn produces_lift(self) -> bool {
        !matches!(self, MotionLaw::Dwell)
    }

    /// Human-readable law name.
    pub fn name(self) -> &'static str {
        match self {
            MotionLaw::Dwell => "dwell",
            MotionLaw::Uniform => "uniform",
            MotionLaw::Parabolic => "parabolic",
            MotionLaw::SimpleHarmonic => "simple harmonic",
            MotionLaw::Cycloidal => "cycloidal",
            MotionLaw::Polynomial345 => "3-4-5 polynomial",
        }
    }
}

impl fmt::Display for MotionLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
