//! Base-radius sweep over one motion program.

use camdyn_motion::generate_motion;
use camdyn_profile::{check_design, synthesize_cam_profile, DesignReport};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::design::CamDesign;
use crate::error::{DesignError, Result};

/// Design check of one candidate base radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepCandidate {
    /// Candidate base radius.
    pub base_radius: f64,
    /// Check against the design's limits.
    pub report: DesignReport,
}

impl SweepCandidate {
    /// Whether the candidate satisfies the limits.
    pub fn passes(&self) -> bool {
        self.report.passes()
    }
}

/// Evenly spaced radii from `from` to `to` inclusive.
pub fn radius_range(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err(DesignError::InvalidSweep(format!("step must be positive, got {step}")));
    }
    if !(from.is_finite() && to.is_finite()) || to < from {
        return Err(DesignError::InvalidSweep(format!("empty range {from}..{to}")));
    }
    let count = ((to - from) / step + 1e-9).floor() as usize + 1;
    Ok((0..count).map(|i| from + i as f64 * step).collect())
}

/// Evaluate every candidate base radius against the design's limits.
///
/// The motion program is sampled once; candidates are synthesized in
/// parallel. Results are in the order of `radii`.
pub fn sweep_base_radius(design: &CamDesign, radii: &[f64]) -> Result<Vec<SweepCandidate>> {
    let kinematics = generate_motion(&design.segments, design.angular_step)?;
    debug!(
        name = %design.name,
        candidates = radii.len(),
        samples = kinematics.len(),
        "sweeping base radius"
    );

    radii
        .par_iter()
        .map(|&base_radius| -> Result<SweepCandidate> {
            let geometry = design.geometry.with_base_radius(base_radius);
            let profile = synthesize_cam_profile(&kinematics, &geometry)?;
            Ok(SweepCandidate {
                base_radius,
                report: check_design(&profile, &geometry, &design.limits),
            })
        })
        .collect()
}

/// Smallest passing base radius among already evaluated candidates, in
/// whatever order they were tried.
pub fn smallest_passing(candidates: &[SweepCandidate]) -> Option<f64> {
    candidates
        .iter()
        .filter(|c| c.passes())
        .map(|c| c.base_radius)
        .reduce(f64::min)
}

/// Smallest candidate base radius that satisfies the design's limits.
pub fn smallest_passing_base_radius(design: &CamDesign, radii: &[f64]) -> Result<Option<f64>> {
    let candidates = sweep_base_radius(design, radii)?;
    Ok(smallest_passing(&candidates))
}
