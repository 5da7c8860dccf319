//! Arc-length index over the alternating segment/arc feature sequence.
//!
//! Features are numbered `0..feature_count()`: even features are trimmed
//! straight segments, odd features are fillets. The base of a feature is the
//! arc length of everything before it on the curve shifted sideways by
//! `offset`; bases are non-decreasing, which is what `locate` relies on.

use super::arc_curve::ArcCurve;

/// One element of the feature sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Trimmed straight segment `index`.
    Segment { index: usize },
    /// Fillet at joint `joint`.
    Arc { joint: usize },
}

impl Feature {
    pub fn from_index(i: usize) -> Self {
        if i % 2 == 1 {
            Feature::Arc { joint: i / 2 }
        } else {
            Feature::Segment { index: i / 2 }
        }
    }

    pub fn index(self) -> usize {
        match self {
            Feature::Segment { index } => 2 * index,
            Feature::Arc { joint } => 2 * joint + 1,
        }
    }

    pub fn is_arc(self) -> bool {
        matches!(self, Feature::Arc { .. })
    }
}

impl ArcCurve {
    /// Number of features: one segment per segment, one arc per joint.
    pub fn feature_count(&self) -> usize {
        2 * self.joints.len() + 1
    }

    pub fn feature(&self, i: usize) -> Feature {
        Feature::from_index(i)
    }

    /// Arc length from the start of the curve to the start of feature `i`,
    /// for the curve offset sideways by `offset`. `i` ranges over
    /// `0..=feature_count()`; the last value is the total length.
    pub fn feature_base(&self, i: usize, offset: f64) -> f64 {
        if i == 0 {
            return self.seg_clengths[0];
        }
        let k = i / 2;
        let seg = if i % 2 == 1 { k + 1 } else { k };
        (self.seg_clengths[seg] + self.arc_prefix(k, offset)).max(0.0)
    }

    /// Combined length of the first `k` fillets at `offset`.
    ///
    /// A fillet whose inside is offset past its center has no length. The
    /// prefix table is only linear in `offset` while no fillet is in that
    /// state; beyond the smallest radius the lengths are summed one by one.
    fn arc_prefix(&self, k: usize, offset: f64) -> f64 {
        if offset.abs() < self.clearance {
            let arc = self.arc_clengths[k];
            arc.x + offset * arc.y
        } else {
            self.joints[..k]
                .iter()
                .map(|j| j.length(offset).max(0.0))
                .sum()
        }
    }

    /// Arc length of feature `i` at `offset`.
    pub fn feature_size(&self, i: usize, offset: f64) -> f64 {
        debug_assert!(i < self.feature_count());
        self.feature_base(i + 1, offset) - self.feature_base(i, offset)
    }

    /// Total arc length of the curve offset by `offset`.
    pub fn length(&self, offset: f64) -> f64 {
        self.feature_base(self.feature_count(), offset)
    }

    /// Feature containing normalized arc length `t` at `offset`.
    pub fn locate(&self, t: f64, offset: f64) -> usize {
        self.locate_scale(t, offset).0
    }

    /// Feature containing normalized arc length `t` at `offset`, together
    /// with the fraction of that feature lying before `t`.
    ///
    /// Zero-length features (fully trimmed segments) are skipped. `t`
    /// outside `[0, 1]` extrapolates along the first or last feature.
    pub fn locate_scale(&self, t: f64, offset: f64) -> (usize, f64) {
        let count = self.feature_count();
        let target = t * self.length(offset);

        // First feature whose base reaches the target.
        let mut low = 0;
        let mut high = count;
        while low < high {
            let mid = low + (high - low) / 2;
            if self.feature_base(mid, offset) < target {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        let mut idx = low.saturating_sub(1);
        while idx + 1 < count && self.feature_size(idx, offset) == 0.0 {
            idx += 1;
        }

        let size = self.feature_size(idx, offset);
        let local = if size > 0.0 {
            (target - self.feature_base(idx, offset)) / size
        } else {
            0.0
        };
        (idx, local)
    }
}
