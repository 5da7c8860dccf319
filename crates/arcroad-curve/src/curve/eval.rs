//! Point and frame queries at a normalized arc-length parameter.

use arcroad_math::{left_of, DMat3, DMat4, Point3, RoadFrame, Vector3};

use super::arc_curve::ArcCurve;
use super::index::Feature;

impl ArcCurve {
    /// Start point and direction of segment feature `i`: the exit of the
    /// preceding fillet, or the first control point.
    pub(crate) fn segment_anchor(&self, i: usize) -> (Point3, Vector3) {
        match (i / 2).checked_sub(1).and_then(|j| self.joints.get(j)) {
            Some(joint) => joint.exit(),
            None => (self.points[0], self.directions[0]),
        }
    }

    /// Centerline position and tangent of the sample at `t`, where `t` is
    /// measured along the curve offset by `offset`.
    fn centerline_at(&self, t: f64, offset: f64) -> (Point3, Vector3) {
        let (idx, local) = self.locate_scale(t, offset);
        match Feature::from_index(idx) {
            Feature::Arc { joint } => {
                let joint = &self.joints[joint];
                joint.eval(local * joint.angle)
            }
            Feature::Segment { .. } => {
                let (pos, tan) = self.segment_anchor(idx);
                (pos + tan * (local * self.feature_size(idx, offset)), tan)
            }
        }
    }

    /// Point at parameter `t` on the rail `offset` to the left of the
    /// centerline.
    pub fn point(&self, t: f64, offset: f64, up: Vector3) -> Point3 {
        let (pos, tan) = self.centerline_at(t, offset);
        pos + left_of(tan, up) * offset
    }

    /// Orthonormal frame (tangent, left, up) at `t` on rail `offset`.
    ///
    /// With `reverse` the frame describes travel against the curve
    /// direction: tangent and left flip, up is unchanged.
    pub fn frame(&self, t: f64, offset: f64, reverse: bool, up: Vector3) -> DMat3 {
        self.road_frame(t, offset, reverse, up).1.to_mat3()
    }

    /// Rigid transform placing the frame of [`ArcCurve::frame`] at
    /// [`ArcCurve::point`].
    pub fn point_frame(&self, t: f64, offset: f64, reverse: bool, up: Vector3) -> DMat4 {
        let (pos, frame) = self.road_frame(t, offset, reverse, up);
        frame.to_mat4(pos)
    }

    fn road_frame(&self, t: f64, offset: f64, reverse: bool, up: Vector3) -> (Point3, RoadFrame) {
        let (pos, tan) = self.centerline_at(t, offset);
        let frame = RoadFrame::from_tangent(tan, up);
        let pos = pos + frame.left * offset;
        if reverse {
            (pos, frame.reversed())
        } else {
            (pos, frame)
        }
    }

    /// Arc length, at `offset`, up to fraction `local` of feature `i`.
    pub fn length_at_feature(&self, i: usize, local: f64, offset: f64) -> f64 {
        self.feature_base(i, offset) + local * self.feature_size(i, offset)
    }

    /// Arc length along rail `offset` up to centerline parameter `t`.
    pub fn length_at(&self, t: f64, offset: f64) -> f64 {
        let (idx, local) = self.locate_scale(t, 0.0);
        self.length_at_feature(idx, local, offset)
    }

    /// Map centerline parameter `t` to the normalized arc length of rail
    /// `offset` at the same cross-section.
    pub fn parameter_map(&self, t: f64, offset: f64) -> f64 {
        let len = self.length(offset);
        if len > 0.0 {
            self.length_at(t, offset) / len
        } else {
            0.0
        }
    }

    /// Inverse of [`ArcCurve::parameter_map`]: normalized arc length `s` on
    /// rail `offset` back to the centerline parameter.
    pub fn inverse_parameter_map(&self, s: f64, offset: f64) -> f64 {
        let len = self.length(0.0);
        if len > 0.0 {
            let (idx, local) = self.locate_scale(s, offset);
            self.length_at_feature(idx, local, 0.0) / len
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arcroad_math::DVec3;

    fn corner(blend: f64) -> ArcCurve {
        let pts = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
        ];
        ArcCurve::from_polyline(&pts, blend).unwrap()
    }

    #[test]
    fn test_endpoints_interpolate() {
        let curve = corner(0.5);
        assert!((curve.point(0.0, 0.0, DVec3::Z) - DVec3::ZERO).length() < 1e-12);
        assert!((curve.point(1.0, 0.0, DVec3::Z) - DVec3::new(4.0, 4.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_offset_moves_left() {
        let curve = corner(0.5);
        let p = curve.point(0.0, 1.0, DVec3::Z);
        assert!((p - DVec3::new(0.0, 1.0, 0.0)).length() < 1e-12);
        // At the end the road heads +Y, so left is -X.
        let p = curve.point(1.0, 1.0, DVec3::Z);
        assert!((p - DVec3::new(3.0, 4.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_arc_midpoint_on_fillet() {
        let curve = corner(0.5);
        let joint = curve.joints()[0];
        // Segment, arc, segment have lengths 2, PI, 2.
        let total = curve.length(0.0);
        let t = (2.0 + 0.5 * joint.length(0.0)) / total;
        let p = curve.point(t, 0.0, DVec3::Z);
        assert_relative_eq!((p - joint.center()).length(), joint.radius, epsilon = 1e-9);
    }

    #[test]
    fn test_frame_is_orthonormal() {
        let curve = corner(0.8);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let m = curve.frame(t, 0.5, false, DVec3::Z);
            let product = m.transpose() * m;
            for c in 0..3 {
                for r in 0..3 {
                    let expected = if c == r { 1.0 } else { 0.0 };
                    assert_relative_eq!(product.col(c)[r], expected, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_reverse_flips_tangent_not_position() {
        let curve = corner(0.8);
        let fwd = curve.point_frame(0.3, 0.7, false, DVec3::Z);
        let rev = curve.point_frame(0.3, 0.7, true, DVec3::Z);
        assert!((fwd.w_axis - rev.w_axis).length() < 1e-12);
        assert!((fwd.x_axis + rev.x_axis).length() < 1e-12);
        assert!((fwd.y_axis + rev.y_axis).length() < 1e-12);
        assert!((fwd.z_axis - rev.z_axis).length() < 1e-12);
        let p = curve.point(0.3, 0.7, DVec3::Z);
        assert!((fwd.w_axis.truncate() - p).length() < 1e-12);
    }

    #[test]
    fn test_parameter_map_endpoints() {
        let curve = corner(0.5);
        assert_relative_eq!(curve.parameter_map(0.0, 1.0), 0.0);
        assert_relative_eq!(curve.parameter_map(1.0, 1.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(curve.parameter_map(0.4, 0.0), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_parameter_map_keeps_cross_section() {
        let curve = corner(0.5);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let s = curve.parameter_map(t, 1.0);
            let center = curve.locate_scale(t, 0.0);
            let rail = curve.locate_scale(s, 1.0);
            assert_eq!(center.0, rail.0, "feature mismatch at t = {}", t);
            assert_relative_eq!(center.1, rail.1, epsilon = 1e-9);
            assert_relative_eq!(curve.inverse_parameter_map(s, 1.0), t, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_length_at_inside_rail_is_shorter() {
        let curve = corner(0.5);
        assert!(curve.length_at(1.0, 1.0) < curve.length_at(1.0, 0.0));
        assert_relative_eq!(curve.length_at(1.0, 0.0), curve.length(0.0), epsilon = 1e-12);
    }
}
