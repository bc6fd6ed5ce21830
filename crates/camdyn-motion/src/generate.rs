//! Fixed-step sampling of a motion cycle.

use camdyn_math::EPSILON;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MotionError, Result};
use crate::segment::{layout_segments, CycleSummary, MotionSegment};
use crate::FULL_CYCLE;

/// Follower kinematics at one cam angle.
///
/// Derivatives are with respect to cam angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicPoint {
    /// Cam angle θ (degrees, `0..=360`).
    pub theta: f64,
    /// Displacement `s`.
    pub displacement: f64,
    /// Velocity `ds/dθ`.
    pub velocity: f64,
    /// Acceleration `d²s/dθ²`.
    pub acceleration: f64,
    /// Jerk `d³s/dθ³`.
    pub jerk: f64,
}

impl KinematicPoint {
    /// A point held at `displacement` with all derivatives zero.
    pub fn at_rest(theta: f64, displacement: f64) -> Self {
        Self {
            theta,
            displacement,
            ..Default::default()
        }
    }
}

/// Number of samples produced for `angular_step`: `⌈360 / step⌉ + 1`.
///
/// A ratio within round-off of an integer is not rounded up, so a step of
/// 0.1° yields 3601 samples. A step so small that the count does not fit
/// in `usize` is rejected.
pub fn sample_count(angular_step: f64) -> Result<usize> {
    if !(angular_step.is_finite() && angular_step > 0.0) {
        return Err(MotionError::InvalidStep(angular_step));
    }
    let ratio = FULL_CYCLE / angular_step;
    let steps = (ratio - EPSILON * ratio.max(1.0)).ceil().max(1.0);
    // `as` saturates, so anything at or past the limit must be caught here
    if !steps.is_finite() || steps >= usize::MAX as f64 {
        return Err(MotionError::InvalidStep(angular_step));
    }
    (steps as usize)
        .checked_add(1)
        .ok_or(MotionError::InvalidStep(angular_step))
}

/// Sample the motion cycle described by `segments` every `angular_step`
/// degrees over `[0, 360]`, both endpoints included.
///
/// Angles past the end of the last segment hold the final cumulative lift
/// with zero derivatives. An empty segment list yields a cycle at rest.
pub fn generate_motion(
    segments: &[MotionSegment],
    angular_step: f64,
) -> Result<Vec<KinematicPoint>> {
    let count = sample_count(angular_step)?;
    let spans = layout_segments(segments);
    let summary = CycleSummary::from_spans(&spans);

    debug!(
        segments = spans.len(),
        samples = count,
        step = angular_step,
        "generating motion"
    );
    if !summary.is_complete() {
        warn!(
            total_duration = summary.total_duration,
            "segment durations do not sum to 360 degrees"
        );
    }
    if !summary.is_closed() {
        warn!(net_lift = summary.net_lift, "cycle does not return to start lift");
    }

    let last = count - 1;
    let mut points = Vec::with_capacity(count);
    let mut cursor = 0;

    for i in 0..count {
        let theta = if i == last {
            FULL_CYCLE
        } else {
            (i as f64 * angular_step).min(FULL_CYCLE)
        };

        while cursor < spans.len() && theta > spans[cursor].end_angle + EPSILON {
            cursor += 1;
        }

        let point = match spans.get(cursor) {
            Some(span) => span.evaluate(theta),
            None => KinematicPoint::at_rest(theta, summary.net_lift),
        };
        points.push(point);
    }

    Ok(points)
}

/// A signed extreme value and the cam angle where it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Peak {
    /// The value (signed).
    pub value: f64,
    /// Cam angle (degrees).
    pub theta: f64,
}

/// Extremes of a sampled motion profile.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicExtrema {
    /// Largest displacement.
    pub max_displacement: Peak,
    /// Smallest displacement.
    pub min_displacement: Peak,
    /// Velocity of largest magnitude.
    pub velocity: Peak,
    /// Acceleration of largest magnitude.
    pub acceleration: Peak,
    /// Jerk of largest magnitude.
    pub jerk: Peak,
}

impl KinematicExtrema {
    /// Scan `points`; returns `None` when empty.
    pub fn from_points(points: &[KinematicPoint]) -> Option<Self> {
        let first = points.first()?;
        let seed = |value: f64| Peak {
            value,
            theta: first.theta,
        };
        let mut ext = Self {
            max_displacement: seed(first.displacement),
            min_displacement: seed(first.displacement),
            velocity: seed(first.velocity),
            acceleration: seed(first.acceleration),
            jerk: seed(first.jerk),
        };

        fn keep_larger_magnitude(peak: &mut Peak, value: f64, theta: f64) {
            if value.abs() > peak.value.abs() {
                *peak = Peak { value, theta };
            }
        }

        for p in &points[1..] {
            if p.displacement > ext.max_displacement.value {
                ext.max_displacement = Peak {
                    value: p.displacement,
                    theta: p.theta,
                };
            }
            if p.displacement < ext.min_displacement.value {
                ext.min_displacement = Peak {
                    value: p.displacement,
                    theta: p.theta,
                };
            }
            keep_larger_magnitude(&mut ext.velocity, p.velocity, p.theta);
            keep_larger_magnitude(&mut ext.acceleration, p.acceleration, p.theta);
            keep_larger_magnitude(&mut ext.jerk, p.jerk, p.theta);
        }

        Some(ext)
    }
}
