//! Colinear control point removal.

use arcroad_math::Point3;

/// Drop interior points that lie on the line through their neighbors.
///
/// The reference direction is carried forward from the last kept point, so a
/// chain of nearly colinear points collapses as a whole instead of point by
/// point. Points next to a zero-length step are always kept; rejecting those
/// is left to segment validation.
pub(crate) fn remove_colinear(points: &[Point3], eps: f64) -> Vec<Point3> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);

    let mut last_dir = (points[1] - points[0]).try_normalize();
    for i in 1..points.len() - 1 {
        let dir = (points[i + 1] - points[i]).try_normalize();
        let colinear = match (last_dir, dir) {
            (Some(a), Some(b)) => a.cross(b).length_squared() <= eps,
            _ => false,
        };

        if colinear {
            let anchor = kept[kept.len() - 1];
            last_dir = (points[i + 1] - anchor).try_normalize();
        } else {
            kept.push(points[i]);
            last_dir = dir;
        }
    }

    kept.push(points[points.len() - 1]);
    kept
}
