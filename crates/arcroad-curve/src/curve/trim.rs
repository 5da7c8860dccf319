//! Trim allocation: how much of each straight segment a fillet may consume.
//!
//! Joint `j` sits between segments `j` and `j + 1` and takes the same trim
//! from both. A segment shared by two joints must hold both trims, so the
//! allocation is a max-min problem: make the smallest fillet radius
//! (`trim * factor`) as large as possible. It is solved bottleneck first:
//! among the unresolved joints of a range, the one whose best achievable
//! radius is smallest is fixed, splitting the range in two.

use tracing::trace;

/// Assign a trim to every joint.
///
/// `lengths` holds one entry per segment and `factors` one per joint
/// (`lengths.len() == factors.len() + 1`). For every segment the trims of
/// its (at most two) joints sum to no more than its length.
pub(crate) fn allocate_trims(lengths: &[f64], factors: &[f64]) -> Vec<f64> {
    let joints = factors.len();
    debug_assert_eq!(lengths.len(), joints + 1);

    let mut trims = vec![0.0; joints];
    // Ranges of unresolved joints. The joints just outside a range are
    // either resolved already or do not exist.
    let mut pending = vec![(0usize, joints)];

    while let Some((start, end)) = pending.pop() {
        if start >= end {
            continue;
        }

        let mut bottleneck: Option<(usize, f64, f64)> = None;
        for j in start..end {
            let incoming = if j > start {
                shared_share(lengths[j], factors[j - 1], factors[j])
            } else if j > 0 {
                lengths[j] - trims[j - 1]
            } else {
                lengths[j]
            };
            let outgoing = if j + 1 < end {
                shared_share(lengths[j + 1], factors[j + 1], factors[j])
            } else if j + 1 < joints {
                lengths[j + 1] - trims[j + 1]
            } else {
                lengths[j + 1]
            };

            let trim = incoming.min(outgoing).max(0.0);
            let radius = trim * factors[j];
            if bottleneck.map_or(true, |(_, _, best)| radius < best) {
                bottleneck = Some((j, trim, radius));
            }
        }

        if let Some((j, trim, radius)) = bottleneck {
            trace!(joint = j, trim, radius, "resolved joint");
            trims[j] = trim;
            pending.push((j + 1, end));
            pending.push((start, j));
        }
    }

    trims
}

/// Part of a segment of `length` given to one joint when it is split with a
/// neighbor so that both fillets get the same radius.
fn shared_share(length: f64, neighbor_factor: f64, own_factor: f64) -> f64 {
    let total = neighbor_factor + own_factor;
    if total > 0.0 {
        length * neighbor_factor / total
    } else {
        0.5 * length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_feasible(lengths: &[f64], trims: &[f64]) {
        for (s, &len) in lengths.iter().enumerate() {
            let before = if s > 0 { trims[s - 1] } else { 0.0 };
            let after = trims.get(s).copied().unwrap_or(0.0);
            assert!(
                before + after <= len + 1e-12,
                "segment {} over-trimmed: {} + {} > {}",
                s,
                before,
                after,
                len
            );
        }
    }

    #[test]
    fn test_no_joints() {
        assert!(allocate_trims(&[3.0], &[]).is_empty());
    }

    #[test]
    fn test_single_joint_limited_by_shorter_segment() {
        let trims = allocate_trims(&[1.0, 2.5], &[1.0]);
        assert_relative_eq!(trims[0], 1.0);
    }

    #[test]
    fn test_equal_factors_split_shared_segment() {
        let lengths = [10.0, 2.0, 10.0];
        let trims = allocate_trims(&lengths, &[1.0, 1.0]);
        assert_relative_eq!(trims[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(trims[1], 1.0, epsilon = 1e-12);
        assert_feasible(&lengths, &trims);
    }

    #[test]
    fn test_split_equalizes_radii() {
        let lengths = [10.0, 3.0, 10.0];
        let factors = [1.0, 2.0];
        let trims = allocate_trims(&lengths, &factors);
        assert_relative_eq!(trims[0] * factors[0], trims[1] * factors[1], epsilon = 1e-12);
        assert_relative_eq!(trims[0] + trims[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bottleneck_resolved_first() {
        // The middle joint is squeezed by two short segments; the outer
        // joints get whatever is left on their shared segments.
        let lengths = [10.0, 1.0, 1.0, 10.0];
        let factors = [1.0, 1.0, 1.0];
        let trims = allocate_trims(&lengths, &factors);
        assert_feasible(&lengths, &trims);
        assert_relative_eq!(trims[1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(trims[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(trims[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_long_chain_feasible() {
        let lengths: Vec<f64> = (0..200).map(|i| 0.5 + (i % 7) as f64 * 0.3).collect();
        let factors: Vec<f64> = (0..199).map(|i| 0.2 + (i % 5) as f64 * 0.4).collect();
        let trims = allocate_trims(&lengths, &factors);
        assert_eq!(trims.len(), 199);
        assert!(trims.iter().all(|&t| t > 0.0));
        assert_feasible(&lengths, &trims);
    }
}
