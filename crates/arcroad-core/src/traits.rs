use crate::error::Result;

/// Check the internal invariants of a constructed entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Axis-aligned extent of an entity.
pub trait BoundingBox {
    type Point;
    fn bounding_box(&self) -> (Self::Point, Self::Point);
}
