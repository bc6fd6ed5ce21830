//! Motion segments and their cumulative layout over the cam cycle.

use camdyn_math::EPSILON;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::law::MotionLaw;
use crate::{KinematicPoint, FULL_CYCLE};

/// One phase of the cam cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSegment {
    /// Motion law applied over the segment.
    pub kind: MotionLaw,
    /// Angular span of the segment (degrees).
    pub duration: f64,
    /// Signed lift change over the segment (length units for translating
    /// followers, degrees of arm swing for oscillating followers).
    #[serde(default)]
    pub delta_lift: f64,
}

impl MotionSegment {
    /// Create a segment.
    pub fn new(kind: MotionLaw, duration: f64, delta_lift: f64) -> Self {
        Self {
            kind,
            duration,
            delta_lift,
        }
    }

    /// A dwell of the given span.
    pub fn dwell(duration: f64) -> Self {
        Self::new(MotionLaw::Dwell, duration, 0.0)
    }
}

/// A segment positioned within the cycle: its cumulative start and end
/// angle and lift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpan {
    /// Position of the segment in the input sequence.
    pub index: usize,
    /// The segment itself.
    pub segment: MotionSegment,
    /// Cumulative start angle (degrees).
    pub start_angle: f64,
    /// `start_angle + duration`.
    pub end_angle: f64,
    /// Cumulative lift at the segment start.
    pub start_lift: f64,
    /// `start_lift + delta_lift`.
    pub end_lift: f64,
}

impl SegmentSpan {
    /// Evaluate the follower kinematics at cam angle `theta` (degrees).
    ///
    /// Derivatives are taken with respect to cam angle in radians. A segment
    /// shorter than [`EPSILON`] behaves as an instantaneous dwell at its
    /// start lift.
    pub fn evaluate(&self, theta: f64) -> KinematicPoint {
        let beta = self.segment.duration;
        let h = self.segment.delta_lift;
        let law = self.segment.kind;

        let beta_r = beta.to_radians();
        if beta < EPSILON || beta_r < EPSILON {
            return KinematicPoint::at_rest(
                theta,
                self.start_lift + h * law.evaluate(0.0).displacement,
            );
        }

        let u = ((theta - self.start_angle) / beta).clamp(0.0, 1.0);
        let f = law.evaluate(u);
        KinematicPoint {
            theta,
            displacement: self.start_lift + h * f.displacement,
            velocity: h / beta_r * f.velocity,
            acceleration: h / (beta_r * beta_r) * f.acceleration,
            jerk: h / (beta_r * beta_r * beta_r) * f.jerk,
        }
    }
}

/// Lay out segments end to end, accumulating start angle and start lift.
///
/// Non-finite durations or lifts are treated as zero.
pub fn layout_segments(segments: &[MotionSegment]) -> Vec<SegmentSpan> {
    let mut spans = Vec::with_capacity(segments.len());
    let mut angle = 0.0;
    let mut lift = 0.0;

    for (index, seg) in segments.iter().enumerate() {
        let mut segment = *seg;
        if !segment.duration.is_finite() || !segment.delta_lift.is_finite() {
            warn!(
                index,
                duration = seg.duration,
                delta_lift = seg.delta_lift,
                "non-finite segment treated as zero"
            );
            if !segment.duration.is_finite() {
                segment.duration = 0.0;
            }
            if !segment.delta_lift.is_finite() {
                segment.delta_lift = 0.0;
            }
        }

        let span = SegmentSpan {
            index,
            segment,
            start_angle: angle,
            end_angle: angle + segment.duration,
            start_lift: lift,
            end_lift: lift + segment.delta_lift,
        };
        trace!(
            index,
            law = %segment.kind,
            start = span.start_angle,
            end = span.end_angle,
            lift = span.end_lift,
            "segment laid out"
        );
        angle = span.end_angle;
        lift = span.end_lift;
        spans.push(span);
    }

    spans
}

/// Aggregate facts about a laid-out cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleSummary {
    /// Number of segments.
    pub segment_count: usize,
    /// Sum of segment durations (degrees).
    pub total_duration: f64,
    /// Lift at the end of the last segment.
    pub net_lift: f64,
    /// Largest cumulative lift reached (never below 0).
    pub max_lift: f64,
    /// Smallest cumulative lift reached (never above 0).
    pub min_lift: f64,
}

impl CycleSummary {
    /// Summarize segments.
    ///
    /// Every supported law is monotone within its segment, so the lift
    /// extremes occur at segment boundaries.
    pub fn from_segments(segments: &[MotionSegment]) -> Self {
        Self::from_spans(&layout_segments(segments))
    }

    /// Summarize already laid-out spans.
    pub fn from_spans(spans: &[SegmentSpan]) -> Self {
        let (min_lift, max_lift) = spans
            .iter()
            .fold((0.0f64, 0.0f64), |(lo, hi), s| {
                (lo.min(s.end_lift), hi.max(s.end_lift))
            });
        Self {
            segment_count: spans.len(),
            total_duration: spans.last().map_or(0.0, |s| s.end_angle),
            net_lift: spans.last().map_or(0.0, |s| s.end_lift),
            max_lift,
            min_lift,
        }
    }

    /// Durations add up to a full revolution.
    pub fn is_complete(&self) -> bool {
        (self.total_duration - FULL_CYCLE).abs() < 1e-6
    }

    /// The follower returns to its starting lift.
    pub fn is_closed(&self) -> bool {
        self.net_lift.abs() < 1e-6
    }

    /// Total lift range.
    pub fn stroke(&self) -> f64 {
        self.max_lift - self.min_lift
    }
}
