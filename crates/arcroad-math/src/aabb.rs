use crate::Point3;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let mut aabb = Self::new(first, first);
        for &p in rest {
            aabb.include(p);
        }
        Some(aabb)
    }

    /// Grow the box so it contains `p`.
    pub fn include(&mut self, p: Point3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }
}
