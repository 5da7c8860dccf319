//! Circular fillets placed at interior control points.

use std::f64::consts::{FRAC_PI_2, PI};

use arcroad_math::{axis_angle, DMat4, DVec4, Point3, Vector3};

/// A circular arc joining two straight segments at an interior control point.
///
/// `frame` is a rigid transform whose x/y columns span the arc plane, whose
/// z column is the rotation axis (binormal) and whose translation is the arc
/// center. The arc starts at `center + radius * x` and sweeps `angle`
/// radians towards `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub frame: DMat4,
    pub radius: f64,
    /// Turn angle, in `(0, PI)`.
    pub angle: f64,
    /// Length taken from each adjacent segment.
    pub trim: f64,
}

impl Joint {
    /// Build the fillet at `corner`, where the polyline turns from
    /// `incoming` to `outgoing` (both unit length and not parallel).
    pub(crate) fn fillet(
        corner: Point3,
        incoming: Vector3,
        outgoing: Vector3,
        trim: f64,
        factor: f64,
    ) -> Self {
        let radius = trim * factor;
        let binormal = outgoing.cross(incoming).normalize();
        let rot = axis_angle(binormal, FRAC_PI_2);
        let to_start = rot * -incoming;
        let to_center = rot.transpose() * outgoing;
        let sweep = binormal.cross(to_start);
        let center = corner + outgoing * trim + to_center * radius;

        let frame = DMat4::from_cols(
            (-to_start).extend(0.0),
            sweep.extend(0.0),
            binormal.extend(0.0),
            DVec4::new(center.x, center.y, center.z, 1.0),
        );
        let angle = PI - (-incoming).dot(outgoing).clamp(-1.0, 1.0).acos();

        Self {
            frame,
            radius,
            angle,
            trim,
        }
    }

    pub fn center(&self) -> Point3 {
        self.frame.w_axis.truncate()
    }

    pub fn binormal(&self) -> Vector3 {
        self.frame.z_axis.truncate()
    }

    /// `-1` when a positive (leftward) offset runs on the inside of the
    /// arc, `+1` otherwise.
    pub fn offset_sign(&self) -> f64 {
        1.0_f64.copysign(self.frame.z_axis.z)
    }

    /// Arc length of the fillet shifted sideways by `offset`.
    pub fn length(&self, offset: f64) -> f64 {
        (self.radius + offset * self.offset_sign()) * self.angle
    }

    /// Position and unit tangent `theta` radians into the arc.
    pub fn eval(&self, theta: f64) -> (Point3, Vector3) {
        let (s, c) = theta.sin_cos();
        let pos = self
            .frame
            .transform_point3(Point3::new(self.radius * c, self.radius * s, 0.0));
        let tan = self.frame.transform_vector3(Vector3::new(-s, c, 0.0));
        (pos, tan)
    }

    pub fn entry(&self) -> (Point3, Vector3) {
        self.eval(0.0)
    }

    pub fn exit(&self) -> (Point3, Vector3) {
        self.eval(self.angle)
    }

    /// Highest speed at which the fillet can be driven without sliding.
    pub fn speed_limit(&self, gravity: f64, friction: f64) -> f64 {
        max_cornering_speed(self.radius, gravity, friction)
    }
}

/// Cornering speed bound `sqrt(r * g * mu)` for a flat curve of radius `r`.
pub fn max_cornering_speed(radius: f64, gravity: f64, friction: f64) -> f64 {
    (radius * gravity * friction).max(0.0).sqrt()
}

/// Converts a trim length into the fillet radius at a joint: the cotangent
/// of half the turn angle between `incoming` and `outgoing`.
pub(crate) fn curvature_factor(incoming: Vector3, outgoing: Vector3) -> f64 {
    let d = incoming.dot(outgoing).clamp(-1.0, 1.0);
    ((1.0 + d) / (1.0 - d)).sqrt()
}
