//! Serializable run configuration.

use std::path::Path;

use camdyn_motion::{generate_motion, CycleSummary, MotionLaw, MotionSegment};
use camdyn_profile::{synthesize_cam_profile, CamGeometry, DesignLimits};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::table::CamTable;

fn default_name() -> String {
    "cam".to_string()
}

fn default_step() -> f64 {
    0.5
}

/// A complete cam design: follower geometry plus the motion program.
///
/// Stored as TOML, with the motion program as an array of `[[segment]]`
/// tables:
///
/// ```toml
/// name = "indexer"
/// angular_step = 0.5
///
/// [geometry]
/// follower = "translating_roller"
/// base_radius = 40.0
/// roller_radius = 10.0
///
/// [[segment]]
/// kind = "cycloidal"
/// duration = 120.0
/// delta_lift = 20.0
///
/// [[segment]]
/// kind = "dwell"
/// duration = 240.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamDesign {
    /// Human-readable design name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Sampling resolution (degrees).
    #[serde(default = "default_step")]
    pub angular_step: f64,
    /// Cam and follower geometry.
    pub geometry: CamGeometry,
    /// Acceptance thresholds used by [`CamDesign::check`].
    #[serde(default)]
    pub limits: DesignLimits,
    /// Motion program, in cycle order.
    #[serde(default, rename = "segment")]
    pub segments: Vec<MotionSegment>,
}

impl Default for CamDesign {
    fn default() -> Self {
        Self::example()
    }
}

impl CamDesign {
    /// Create a design with the default step and limits.
    pub fn new(name: impl Into<String>, geometry: CamGeometry, segments: Vec<MotionSegment>) -> Self {
        Self {
            name: name.into(),
            angular_step: default_step(),
            geometry,
            limits: DesignLimits::default(),
            segments,
        }
    }

    /// A rise-dwell-return-dwell cam with a translating roller follower.
    pub fn example() -> Self {
        Self::new(
            "rise-dwell-return",
            CamGeometry::translating_roller(40.0, 10.0, 0.0),
            vec![
                MotionSegment::new(MotionLaw::Cycloidal, 120.0, 20.0),
                MotionSegment::dwell(60.0),
                MotionSegment::new(MotionLaw::Polynomial345, 120.0, -20.0),
                MotionSegment::dwell(60.0),
            ],
        )
    }

    /// Set the sampling resolution.
    pub fn with_step(mut self, angular_step: f64) -> Self {
        self.angular_step = angular_step;
        self
    }

    /// Set the acceptance thresholds.
    pub fn with_limits(mut self, limits: DesignLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse a design from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a design from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let design = Self::from_toml_str(&text)?;
        info!(path = %path.display(), name = %design.name, "loaded cam design");
        Ok(design)
    }

    /// Render the design as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Summary of the motion program.
    pub fn summary(&self) -> CycleSummary {
        CycleSummary::from_segments(&self.segments)
    }

    /// Sample the motion program and synthesize the cam outline.
    pub fn evaluate(&self) -> Result<CamTable> {
        debug!(
            name = %self.name,
            step = self.angular_step,
            segments = self.segments.len(),
            "evaluating cam design"
        );
        let kinematics = generate_motion(&self.segments, self.angular_step)?;
        let profile = synthesize_cam_profile(&kinematics, &self.geometry)?;
        Ok(CamTable::from_parts(&kinematics, &profile, self.angular_step))
    }
}
