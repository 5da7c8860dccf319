//! Construction and extraction settings.

use arcroad_core::{Result, RoadError, Tolerance};
use arcroad_math::Vector3;
use serde::{Deserialize, Serialize};

/// Settings for building an [`ArcCurve`](crate::ArcCurve) from control points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Fraction of the optimal trim actually taken at each joint, in `[0, 1]`.
    /// `1.0` gives the largest feasible fillets, `0.0` keeps sharp corners.
    pub blend: f64,
    /// Default up direction used by the [`Curve`](crate::Curve) impl.
    pub up: Vector3,
    pub tolerance: Tolerance,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            blend: 1.0,
            up: Vector3::Z,
            tolerance: Tolerance::default(),
        }
    }
}

impl CurveConfig {
    #[must_use]
    pub fn with_blend(mut self, blend: f64) -> Self {
        self.blend = blend;
        self
    }

    #[must_use]
    pub fn with_up(mut self, up: Vector3) -> Self {
        self.up = up;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub(crate) fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.blend) {
            return Err(RoadError::InvalidParameter(format!(
                "blend must lie in [0, 1], got {}",
                self.blend
            )));
        }
        if !self.up.is_finite() || self.up.length_squared() == 0.0 {
            return Err(RoadError::InvalidParameter(format!(
                "up vector must be finite and non-zero, got {:?}",
                self.up
            )));
        }
        Ok(())
    }
}

/// Settings for adaptive polyline extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Largest allowed distance between consecutive samples on an arc.
    pub resolution: f64,
    /// Samples closer than this to the previous sample are merged into it.
    pub merge_distance: f64,
}

impl ExtractConfig {
    pub const DEFAULT_RESOLUTION: f64 = 0.01;
    pub const DEFAULT_MERGE_DISTANCE: f64 = 1e-3;

    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_merge_distance(mut self, merge_distance: f64) -> Self {
        self.merge_distance = merge_distance;
        self
    }

    /// Reject resolutions that would make bisection meaningless.
    pub fn check(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(RoadError::InvalidParameter(format!(
                "resolution must be positive and finite, got {}",
                self.resolution
            )));
        }
        if !(self.merge_distance >= 0.0) {
            return Err(RoadError::InvalidParameter(format!(
                "merge distance must be non-negative, got {}",
                self.merge_distance
            )));
        }
        Ok(())
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            resolution: Self::DEFAULT_RESOLUTION,
            merge_distance: Self::DEFAULT_MERGE_DISTANCE,
        }
    }
}
