/// Tolerances used while building road curves.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Shortest segment length accepted by construction (in model units)
    pub linear: f64,
    /// Squared cross product of adjacent unit directions below which an
    /// interior control point is considered colinear and removed
    pub colinear: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;
    pub const DEFAULT_COLINEAR: f64 = 1e-6;

    /// Check if a length is too short to carry a segment
    pub fn is_degenerate(self, length: f64) -> bool {
        length.is_nan() || length < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
            colinear: Self::DEFAULT_COLINEAR,
        }
    }
}
