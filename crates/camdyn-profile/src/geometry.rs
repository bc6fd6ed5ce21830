//! Follower and cam geometry for one synthesis run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// The closed set of follower types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowerKind {
    /// Roller on a straight slide.
    #[default]
    TranslatingRoller,
    /// Flat face on a straight slide.
    TranslatingFlat,
    /// Roller on a pivoting arm.
    OscillatingRoller,
    /// Flat face on a pivoting arm.
    OscillatingFlat,
}

impl FollowerKind {
    /// Every follower kind, in declaration order.
    pub const ALL: [FollowerKind; 4] = [
        FollowerKind::TranslatingRoller,
        FollowerKind::TranslatingFlat,
        FollowerKind::OscillatingRoller,
        FollowerKind::OscillatingFlat,
    ];

    /// Whether the follower touches the cam through a roller.
    pub fn is_roller(self) -> bool {
        matches!(
            self,
            FollowerKind::TranslatingRoller | FollowerKind::OscillatingRoller
        )
    }

    /// Whether the follower swings on a pivot (lift is an angle).
    pub fn is_oscillating(self) -> bool {
        matches!(
            self,
            FollowerKind::OscillatingRoller | FollowerKind::OscillatingFlat
        )
    }
}

impl fmt::Display for FollowerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FollowerKind::TranslatingRoller => "translating roller",
            FollowerKind::TranslatingFlat => "translating flat-faced",
            FollowerKind::OscillatingRoller => "oscillating roller",
            FollowerKind::OscillatingFlat => "oscillating flat-faced",
        };
        f.write_str(name)
    }
}

/// Direction the cam turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationSense {
    /// Counter-clockwise when viewed from the front.
    #[default]
    #[serde(alias = "ccw")]
    CounterClockwise,
    /// Clockwise when viewed from the front.
    #[serde(alias = "cw")]
    Clockwise,
}

impl RotationSense {
    /// Sign of the inversion rotation taking the home frame into the cam
    /// frame: `-1` for counter-clockwise (`R(-θ)`), `+1` for clockwise.
    pub fn inversion_sign(self) -> f64 {
        match self {
            RotationSense::CounterClockwise => -1.0,
            RotationSense::Clockwise => 1.0,
        }
    }
}

/// Static cam/follower geometry.
///
/// The follower is described in the same home frame for either rotation
/// sense; only the inversion rotation changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CamGeometry {
    /// Follower type.
    #[serde(default)]
    pub follower: FollowerKind,
    /// Base circle radius `rb`.
    pub base_radius: f64,
    /// Roller radius `r0` (roller followers).
    #[serde(default)]
    pub roller_radius: f64,
    /// Follower offset `e`: slide eccentricity for translating followers,
    /// face offset from the pivot for the oscillating flat-faced follower.
    #[serde(default)]
    pub offset: f64,
    /// Distance `r1` from cam centre to arm pivot (oscillating followers).
    #[serde(default)]
    pub pivot_distance: f64,
    /// Arm length `r3` from pivot to roller centre (oscillating roller).
    #[serde(default)]
    pub arm_length: f64,
    /// Rotation applied to the finished outline (degrees, counter-clockwise).
    #[serde(default)]
    pub start_angle: f64,
    /// Direction the cam turns.
    #[serde(default)]
    pub rotation: RotationSense,
}

impl Default for CamGeometry {
    fn default() -> Self {
        Self::translating_roller(40.0, 10.0, 0.0)
    }
}

impl CamGeometry {
    fn base(follower: FollowerKind, base_radius: f64) -> Self {
        Self {
            follower,
            base_radius,
            roller_radius: 0.0,
            offset: 0.0,
            pivot_distance: 0.0,
            arm_length: 0.0,
            start_angle: 0.0,
            rotation: RotationSense::CounterClockwise,
        }
    }

    /// Translating roller follower.
    pub fn translating_roller(base_radius: f64, roller_radius: f64, offset: f64) -> Self {
        Self {
            roller_radius,
            offset,
            ..Self::base(FollowerKind::TranslatingRoller, base_radius)
        }
    }

    /// Translating flat-faced follower.
    pub fn translating_flat(base_radius: f64) -> Self {
        Self::base(FollowerKind::TranslatingFlat, base_radius)
    }

    /// Oscillating roller follower.
    pub fn oscillating_roller(
        base_radius: f64,
        roller_radius: f64,
        pivot_distance: f64,
        arm_length: f64,
    ) -> Self {
        Self {
            roller_radius,
            pivot_distance,
            arm_length,
            ..Self::base(FollowerKind::OscillatingRoller, base_radius)
        }
    }

    /// Oscillating flat-faced follower whose face sits `face_offset` from
    /// the pivot, on the cam side.
    pub fn oscillating_flat(base_radius: f64, pivot_distance: f64, face_offset: f64) -> Self {
        Self {
            pivot_distance,
            offset: face_offset,
            ..Self::base(FollowerKind::OscillatingFlat, base_radius)
        }
    }

    /// Set the rotation sense.
    pub fn with_rotation(mut self, rotation: RotationSense) -> Self {
        self.rotation = rotation;
        self
    }

    /// Same geometry on a different base circle.
    pub fn with_base_radius(mut self, base_radius: f64) -> Self {
        self.base_radius = base_radius;
        self
    }

    /// Set the outline alignment angle (degrees).
    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    /// Check the static contract: finite fields, non-negative base and
    /// roller radii.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("base_radius", self.base_radius),
            ("roller_radius", self.roller_radius),
            ("offset", self.offset),
            ("pivot_distance", self.pivot_distance),
            ("arm_length", self.arm_length),
            ("start_angle", self.start_angle),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ProfileError::InvalidGeometry(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.base_radius < 0.0 {
            return Err(ProfileError::NegativeBaseRadius(self.base_radius));
        }
        if self.roller_radius < 0.0 {
            return Err(ProfileError::InvalidGeometry(format!(
                "roller_radius must not be negative, got {}",
                self.roller_radius
            )));
        }
        Ok(())
    }
}
