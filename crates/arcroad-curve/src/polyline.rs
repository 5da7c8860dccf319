//! Control polylines for connecting two oriented points.

use arcroad_core::{Result, RoadError, Tolerance};
use arcroad_math::{Point3, Vector3};

/// Control polyline leaving `start` along `start_tan` and arriving at `end`
/// along `end_tan`.
///
/// When the two tangent lines meet ahead of `start` and behind `end`, the
/// polyline is the corner `[start, corner, end]`. Otherwise two inner
/// points are placed a third of the chord along each tangent.
pub fn polyline_from_tangents(
    start: Point3,
    start_tan: Vector3,
    end: Point3,
    end_tan: Vector3,
) -> Result<Vec<Point3>> {
    let eps = Tolerance::DEFAULT_LINEAR;
    let (Some(t0), Some(t1)) = (start_tan.try_normalize(), end_tan.try_normalize()) else {
        return Err(RoadError::InvalidParameter(
            "tangents must be non-zero and finite".into(),
        ));
    };

    let chord = end.distance(start);
    if chord < eps {
        return Err(RoadError::DegenerateSegment {
            index: 0,
            length: chord,
        });
    }

    if let Some(corner) = tangent_corner(start, t0, end, t1, eps) {
        return Ok(vec![start, corner, end]);
    }

    let reach = chord / 3.0;
    Ok(vec![start, start + t0 * reach, end - t1 * reach, end])
}

/// Meeting point of `start + s * t0` and `end - u * t1` with `s, u > eps`.
/// Skew lines meet at the midpoint of their closest approach.
fn tangent_corner(start: Point3, t0: Vector3, end: Point3, t1: Vector3, eps: f64) -> Option<Point3> {
    let w = start - end;
    let b = t0.dot(t1);
    let d = t0.dot(w);
    let e = t1.dot(w);
    let denom = 1.0 - b * b;
    if denom < eps {
        return None;
    }

    let s = (b * e - d) / denom;
    let v = (e - b * d) / denom;
    if s <= eps || -v <= eps {
        return None;
    }
    Some(((start + t0 * s) + (end + t1 * v)) * 0.5)
}
