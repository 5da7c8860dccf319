//! Curve trait and the arc-spline road curve.

mod arc_curve;
mod eval;
mod index;
mod joint;
mod simplify;
mod trim;

use arcroad_math::{Point3, Vector3};

pub use arc_curve::ArcCurve;
pub use index::Feature;
pub use joint::{max_cornering_speed, Joint};

/// Trait for parametric curves in 3D space.
pub trait Curve: Send + Sync {
    /// Evaluate the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// Evaluate the unit tangent at parameter `t`.
    fn tangent_at(&self, t: f64) -> Vector3;

    /// Return the parameter domain `(t_min, t_max)`.
    fn domain(&self) -> (f64, f64);
}

/// Centerline view using the curve's default up direction.
impl Curve for ArcCurve {
    fn point_at(&self, t: f64) -> Point3 {
        self.point(t, 0.0, self.up())
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        self.frame(t, 0.0, false, self.up()).x_axis
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcroad_math::DVec3;

    #[test]
    fn test_curve_trait_on_arc_curve() {
        let pts = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
            DVec3::new(3.0, 3.0, 0.0),
        ];
        let curve = ArcCurve::from_polyline(&pts, 0.5).unwrap();
        let dyn_curve: &dyn Curve = &curve;
        assert_eq!(dyn_curve.domain(), (0.0, 1.0));
        assert!((dyn_curve.point_at(0.0) - pts[0]).length() < 1e-12);
        assert!((dyn_curve.tangent_at(0.0) - DVec3::X).length() < 1e-12);
        assert!((dyn_curve.tangent_at(1.0) - DVec3::Y).length() < 1e-9);
    }
}
