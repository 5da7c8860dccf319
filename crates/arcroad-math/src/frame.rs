//! Rotations about an axis and orthonormal road frames.
//!
//! A road frame is spanned by the travel direction (`tangent`), the
//! direction a positive lateral offset moves towards (`left`) and the
//! re-orthogonalized `up` vector. Frames are rebuilt on every query from a
//! tangent and a caller-supplied up hint.

use crate::{DMat3, DMat4, DVec4, Point3, Vector3};

/// Rotation matrix for `angle` radians about the unit vector `axis`
/// (right-handed).
pub fn axis_angle(axis: Vector3, angle: f64) -> DMat3 {
    DMat3::from_axis_angle(axis, angle)
}

/// Unit vector pointing to the left of `tangent` with respect to `up`.
pub fn left_of(tangent: Vector3, up: Vector3) -> Vector3 {
    up.cross(tangent).normalize()
}

/// An orthonormal frame attached to a point of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadFrame {
    pub tangent: Vector3,
    pub left: Vector3,
    pub up: Vector3,
}

impl RoadFrame {
    /// Build a frame from a tangent and an up hint.
    ///
    /// `up` only needs to be non-parallel to `tangent`; the returned frame's
    /// up is recomputed as `tangent x left`.
    pub fn from_tangent(tangent: Vector3, up: Vector3) -> Self {
        let left = left_of(tangent, up);
        let up = tangent.cross(left).normalize();
        Self { tangent, left, up }
    }

    /// Same frame traversed the other way: tangent and left both flip.
    pub fn reversed(&self) -> Self {
        Self {
            tangent: -self.tangent,
            left: -self.left,
            up: self.up,
        }
    }

    /// Columns are (tangent, left, up).
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols(self.tangent, self.left, self.up)
    }

    /// Rigid transform with the frame's axes as rotation and `origin` as
    /// translation.
    pub fn to_mat4(&self, origin: Point3) -> DMat4 {
        DMat4::from_cols(
            self.tangent.extend(0.0),
            self.left.extend(0.0),
            self.up.extend(0.0),
            DVec4::new(origin.x, origin.y, origin.z, 1.0),
        )
    }
}
