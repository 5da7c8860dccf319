//! Greedy triangulation of the strip between two rails.
//!
//! Each rail keeps a base vertex. At every step both rails propose their
//! next vertex; the proposal whose triangle with the two bases has the
//! smaller largest interior angle wins, the triangle is emitted and that
//! rail advances. Rails may have different sample counts.

use std::f64::consts::PI;

use arcroad_math::Point3;
use tracing::trace;

/// Triangulate the strip between rails `low` and `high`, given as indices
/// into `positions` in travel order.
///
/// Triangles are wound `(low base, high base, candidate)`. A rail with no
/// vertices yields no triangles.
pub fn stitch_rails(positions: &[Point3], low: &[u32], high: &[u32]) -> Vec<[u32; 3]> {
    let (Some(&first_low), Some(&first_high)) = (low.first(), high.first()) else {
        return Vec::new();
    };

    let mut faces = Vec::with_capacity(low.len() + high.len() - 2);
    let mut base = (first_low, first_high);
    let mut low_next = 1;
    let mut high_next = 1;

    loop {
        let take_low = match (low.get(low_next), high.get(high_next)) {
            (None, None) => break,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(&lc), Some(&hc)) => {
                let lo = max_angle(positions, [base.0, base.1, lc]);
                let hi = max_angle(positions, [base.0, base.1, hc]);
                lo <= hi
            }
        };

        if take_low {
            let cand = low[low_next];
            faces.push([base.0, base.1, cand]);
            base.0 = cand;
            low_next += 1;
        } else {
            let cand = high[high_next];
            faces.push([base.0, base.1, cand]);
            base.1 = cand;
            high_next += 1;
        }
    }

    trace!(low = low.len(), high = high.len(), faces = faces.len(), "stitched rails");
    faces
}

/// Largest interior angle of a triangle, `PI` when an edge is degenerate.
fn max_angle(positions: &[Point3], tri: [u32; 3]) -> f64 {
    let [a, b, c] = tri.map(|i| positions[i as usize]);
    let angle = |at: Point3, p: Point3, q: Point3| -> Option<f64> {
        let u = (p - at).try_normalize()?;
        let v = (q - at).try_normalize()?;
        Some(u.dot(v).clamp(-1.0, 1.0).acos())
    };
    match (angle(a, b, c), angle(b, c, a)) {
        (Some(alpha), Some(beta)) => alpha.max(beta).max(PI - alpha - beta),
        _ => PI,
    }
}
