//! Arc-spline road curve: straight segments joined by circular fillets.

use arcroad_core::{BoundingBox, Result, RoadError, Validate};
use arcroad_math::{Aabb3, DVec2, Point3, Vector3};
use tracing::{debug, warn};

use super::joint::{curvature_factor, Joint};
use super::simplify::remove_colinear;
use super::trim::allocate_trims;
use crate::config::CurveConfig;

/// A road centerline built from a sparse control polygon.
///
/// Interior control points are replaced by circular fillets whose trims are
/// allocated so the tightest fillet is as wide as the polygon allows. All
/// derived tables are computed once in [`ArcCurve::new`]; editing the curve
/// means building a new one.
#[derive(Debug, Clone)]
pub struct ArcCurve {
    /// Control points left after colinear removal.
    pub(crate) points: Vec<Point3>,
    /// Unit direction of each segment.
    pub(crate) directions: Vec<Vector3>,
    pub(crate) joints: Vec<Joint>,
    /// Prefix sums of trimmed segment lengths, one entry per point.
    pub(crate) seg_clengths: Vec<f64>,
    /// Prefix sums of `(arc length, signed turn angle)`, one entry per segment.
    pub(crate) arc_clengths: Vec<DVec2>,
    /// Smallest fillet radius; offsets below it keep every fillet intact.
    pub(crate) clearance: f64,
    pub(crate) up: Vector3,
}

impl ArcCurve {
    /// Build a curve from control points.
    ///
    /// # Errors
    /// - [`RoadError::TooFewPoints`] for fewer than two points
    /// - [`RoadError::DegenerateSegment`] when two consecutive (post
    ///   simplification) points are closer than the linear tolerance
    /// - [`RoadError::InvalidParameter`] for non-finite points or a bad config
    pub fn new(points: &[Point3], config: &CurveConfig) -> Result<Self> {
        config.check()?;
        if points.len() < 2 {
            return Err(RoadError::TooFewPoints {
                required: 2,
                actual: points.len(),
            });
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(RoadError::InvalidParameter(format!(
                "control point {} is not finite: {:?}",
                i, points[i]
            )));
        }

        let points = remove_colinear(points, config.tolerance.colinear);

        let mut directions = Vec::with_capacity(points.len() - 1);
        let mut lengths = Vec::with_capacity(points.len() - 1);
        for (index, pair) in points.windows(2).enumerate() {
            let delta = pair[1] - pair[0];
            let length = delta.length();
            if config.tolerance.is_degenerate(length) {
                warn!(index, length, "rejecting degenerate segment");
                return Err(RoadError::DegenerateSegment { index, length });
            }
            directions.push(delta / length);
            lengths.push(length);
        }

        let factors: Vec<f64> = directions
            .windows(2)
            .map(|d| curvature_factor(d[0], d[1]))
            .collect();
        let mut trims = allocate_trims(&lengths, &factors);
        for trim in &mut trims {
            *trim *= config.blend;
        }

        let joints: Vec<Joint> = trims
            .iter()
            .enumerate()
            .map(|(i, &trim)| {
                Joint::fillet(points[i + 1], directions[i], directions[i + 1], trim, factors[i])
            })
            .collect();

        let mut arc_clengths = Vec::with_capacity(joints.len() + 1);
        let mut acc = DVec2::ZERO;
        arc_clengths.push(acc);
        for joint in &joints {
            acc += DVec2::new(joint.radius * joint.angle, joint.angle * joint.offset_sign());
            arc_clengths.push(acc);
        }

        for (i, &trim) in trims.iter().enumerate() {
            lengths[i] -= trim;
            lengths[i + 1] -= trim;
        }
        let mut seg_clengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        seg_clengths.push(total);
        for &len in &lengths {
            total += len.max(0.0);
            seg_clengths.push(total);
        }

        let clearance = joints
            .iter()
            .map(|j| j.radius)
            .fold(f64::INFINITY, f64::min);

        let curve = Self {
            points,
            directions,
            joints,
            seg_clengths,
            arc_clengths,
            clearance,
            up: config.up.normalize(),
        };
        debug!(
            points = curve.points.len(),
            arcs = curve.arc_count(),
            length = curve.length(0.0),
            "built arc curve"
        );
        Ok(curve)
    }

    /// Build a curve with default settings and the given blend.
    pub fn from_polyline(points: &[Point3], blend: f64) -> Result<Self> {
        Self::new(points, &CurveConfig::default().with_blend(blend))
    }

    /// Control points after colinear removal.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn directions(&self) -> &[Vector3] {
        &self.directions
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn seg_clengths(&self) -> &[f64] {
        &self.seg_clengths
    }

    pub fn arc_clengths(&self) -> &[DVec2] {
        &self.arc_clengths
    }

    pub fn arc_count(&self) -> usize {
        self.joints.len()
    }

    /// Default up direction.
    pub fn up(&self) -> Vector3 {
        self.up
    }

    /// Radius of the tightest fillet, if there is one.
    pub fn min_radius(&self) -> Option<f64> {
        self.joints.iter().map(|j| j.radius).reduce(f64::min)
    }

    /// Per-joint cornering speed bounds.
    pub fn speed_limits(&self, gravity: f64, friction: f64) -> Vec<f64> {
        self.joints
            .iter()
            .map(|j| j.speed_limit(gravity, friction))
            .collect()
    }

    /// Shift the whole curve by `offset`.
    pub fn translate(&mut self, offset: Vector3) {
        for p in &mut self.points {
            *p += offset;
        }
        for joint in &mut self.joints {
            joint.frame.w_axis += offset.extend(0.0);
        }
    }

    /// Box around the control points, which also encloses every fillet.
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_points(&self.points).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

impl BoundingBox for ArcCurve {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        let aabb = self.aabb();
        (aabb.min, aabb.max)
    }
}

impl Validate for ArcCurve {
    fn validate(&self) -> Result<()> {
        let n = self.points.len();
        let sizes = [
            ("directions", self.directions.len(), n - 1),
            ("joints", self.joints.len(), n.saturating_sub(2)),
            ("seg_clengths", self.seg_clengths.len(), n),
            ("arc_clengths", self.arc_clengths.len(), n - 1),
        ];
        for (name, actual, expected) in sizes {
            if actual != expected {
                return Err(RoadError::Geometry(format!(
                    "{} has {} entries, expected {} for {} points",
                    name, actual, expected, n
                )));
            }
        }

        for (s, pair) in self.points.windows(2).enumerate() {
            let length = pair[0].distance(pair[1]);
            let before = if s > 0 { self.joints[s - 1].trim } else { 0.0 };
            let after = self.joints.get(s).map_or(0.0, |j| j.trim);
            if before + after > length * (1.0 + 1e-9) {
                return Err(RoadError::Geometry(format!(
                    "segment {} of length {} is trimmed by {} + {}",
                    s, length, before, after
                )));
            }
        }

        if self.seg_clengths.windows(2).any(|w| w[1] < w[0]) {
            return Err(RoadError::Geometry(
                "segment length table is not monotone".into(),
            ));
        }
        Ok(())
    }
}
