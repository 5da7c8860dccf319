//! Adaptive polyline extraction of offset rails.
//!
//! Straight features only need their endpoints. Fillets are bisected until
//! consecutive samples are no farther apart than the resolution. Every
//! sample carries the normalized arc length of the rail it lies on, so
//! pieces stitched from different features line up without seams.

use arcroad_core::Result;
use arcroad_math::{Point2, Point3, RoadFrame, Vector3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::ExtractConfig;
use crate::curve::{ArcCurve, Feature};

/// A polyline sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3,
    /// Re-orthogonalized up vector at the sample.
    pub normal: Vector3,
    /// `x` is the normalized arc length; `y` is left to the caller.
    pub tex_coord: Point2,
}

impl Vertex {
    pub fn new(position: Point3, normal: Vector3, tex_coord: Point2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Appends samples of one rail to an output buffer.
struct Extractor<'a> {
    curve: &'a ArcCurve,
    offset: f64,
    up: Vector3,
    config: ExtractConfig,
    rail_length: f64,
    out: &'a mut Vec<Vertex>,
}

impl<'a> Extractor<'a> {
    fn push(&mut self, v: Vertex) {
        push_merged(&mut *self.out, v, self.config.merge_distance);
    }

    /// Rail range covered by feature `i`, normalized by the rail length.
    fn tex_range(&self, i: usize) -> (f64, f64) {
        if self.rail_length > 0.0 {
            let base = self.curve.feature_base(i, self.offset);
            let size = self.curve.feature_size(i, self.offset);
            (base / self.rail_length, (base + size) / self.rail_length)
        } else {
            (0.0, 0.0)
        }
    }

    fn sample(&self, pos: Point3, tan: Vector3, tex: f64) -> Vertex {
        let frame = RoadFrame::from_tangent(tan, self.up);
        Vertex::new(
            pos + frame.left * self.offset,
            frame.up,
            Point2::new(tex, 0.0),
        )
    }

    fn arc_sample(&self, joint: usize, u: f64, tex: (f64, f64)) -> Vertex {
        let j = &self.curve.joints[joint];
        let (pos, tan) = j.eval(u * j.angle);
        self.sample(pos, tan, lerp(u, tex.0, tex.1))
    }

    /// Sample fraction `local` of segment feature `i`.
    fn segment_point(&mut self, i: usize, local: f64) {
        let (pos, tan) = self.curve.segment_anchor(i);
        let size = self.curve.feature_size(i, self.offset);
        let tex = self.tex_range(i);
        let v = self.sample(pos + tan * (local * size), tan, lerp(local, tex.0, tex.1));
        self.push(v);
    }

    /// Sample fractions `lo..=hi` of the fillet at `joint`.
    fn arc(&mut self, joint: usize, lo: f64, hi: f64) {
        let feature = Feature::Arc { joint }.index();
        let tex = self.tex_range(feature);
        let lo = lo.max(0.0);
        let hi = hi.min(1.0);

        let start = self.arc_sample(joint, lo, tex);
        self.push(start);
        if hi <= lo {
            return;
        }
        let end = self.arc_sample(joint, hi, tex);
        // A rail offset past the center of a fillet has no arc to follow;
        // it jumps straight across the corner.
        if self.curve.feature_size(feature, self.offset) <= 0.0 {
            self.push(end);
            return;
        }

        let sweep = self.curve.joints[joint].length(self.offset).abs() * (hi - lo);
        let max_depth = bisection_depth(sweep, self.config.resolution);

        // The previous sample may be a merged one from an earlier feature.
        let mut current = match self.out.last() {
            Some(&v) => (lo, v),
            None => (lo, start),
        };
        let mut pending = vec![(hi, end, 0u32)];
        let before = self.out.len();

        while let Some(&(u, v, depth)) = pending.last() {
            let far = current.1.position.distance(v.position) > self.config.resolution;
            if far && depth < max_depth {
                let mid = 0.5 * (current.0 + u);
                let mid_vertex = self.arc_sample(joint, mid, tex);
                if let Some(top) = pending.last_mut() {
                    top.2 = depth + 1;
                }
                pending.push((mid, mid_vertex, depth + 1));
            } else {
                pending.pop();
                self.push(v);
                current = (u, v);
            }
        }
        trace!(joint, max_depth, samples = self.out.len() - before, "sampled fillet");
    }
}

/// Append `v` unless it lands within `merge_distance` of the last sample.
fn push_merged(out: &mut Vec<Vertex>, v: Vertex, merge_distance: f64) {
    if let Some(last) = out.last() {
        if last.position.distance(v.position) < merge_distance {
            return;
        }
    }
    out.push(v);
}

/// Bisection levels after which every piece of an arc of length `sweep`
/// is no longer than `resolution`. Zero when nothing needs splitting or
/// the resolution is not a positive number.
fn bisection_depth(sweep: f64, resolution: f64) -> u32 {
    if !(resolution > 0.0) || !sweep.is_finite() || sweep <= resolution {
        return 0;
    }
    (sweep / resolution).log2().ceil() as u32 + 1
}

fn lerp(x: f64, a: f64, b: f64) -> f64 {
    a + x * (b - a)
}

impl ArcCurve {
    /// Polyline approximation of rail `offset` over the normalized rail
    /// arc-length range `range`. A high-to-low range yields the samples in
    /// reverse order.
    ///
    /// A `resolution` that is not a positive number disables arc
    /// bisection: only feature endpoints are emitted.
    pub fn extract_line(&self, range: [f64; 2], offset: f64, resolution: f64, up: Vector3) -> Vec<Vertex> {
        let mut out = Vec::new();
        self.extract_range(&mut out, range, offset, &ExtractConfig::new(resolution), up);
        out
    }

    /// Like [`ArcCurve::extract_line`], appending to `out`. The first new
    /// sample is merged with the last existing one when they coincide.
    ///
    /// # Errors
    /// [`RoadError::InvalidParameter`](arcroad_core::RoadError) when `config`
    /// fails [`ExtractConfig::check`]; `out` is left untouched.
    pub fn extract_line_into(
        &self,
        out: &mut Vec<Vertex>,
        range: [f64; 2],
        offset: f64,
        config: &ExtractConfig,
        up: Vector3,
    ) -> Result<()> {
        config.check()?;
        self.extract_range(out, range, offset, config, up);
        Ok(())
    }

    fn extract_range(
        &self,
        out: &mut Vec<Vertex>,
        range: [f64; 2],
        offset: f64,
        config: &ExtractConfig,
        up: Vector3,
    ) {
        if range[0] > range[1] {
            let mut scratch = Vec::new();
            self.extract_forward(&mut scratch, [range[1], range[0]], offset, config, up);
            for v in scratch.into_iter().rev() {
                push_merged(out, v, config.merge_distance);
            }
        } else {
            self.extract_forward(out, range, offset, config, up);
        }
    }

    fn extract_forward(
        &self,
        out: &mut Vec<Vertex>,
        [lo, hi]: [f64; 2],
        offset: f64,
        config: &ExtractConfig,
        up: Vector3,
    ) {
        let mut ex = Extractor {
            curve: self,
            offset,
            up,
            config: *config,
            rail_length: self.length(offset),
            out,
        };

        let (start_feature, start_local) = self.locate_scale(lo, offset);
        let (end_feature, end_local) = self.locate_scale(hi, offset);

        let first_full_arc = match Feature::from_index(start_feature) {
            Feature::Arc { joint } => {
                let end = if start_feature == end_feature { end_local } else { 1.0 };
                ex.arc(joint, start_local, end);
                joint + 1
            }
            Feature::Segment { index } => {
                ex.segment_point(start_feature, start_local);
                index
            }
        };

        for joint in first_full_arc..end_feature / 2 {
            ex.arc(joint, 0.0, 1.0);
        }

        match Feature::from_index(end_feature) {
            Feature::Arc { joint } => {
                if start_feature != end_feature {
                    ex.arc(joint, 0.0, end_local);
                }
            }
            Feature::Segment { .. } => ex.segment_point(end_feature, end_local),
        }
    }

    /// Like [`ArcCurve::extract_line`], but `range` is given in centerline
    /// parameters and the texture coordinate of every sample is the
    /// centerline parameter of its cross-section, so rails at different
    /// offsets share coordinates.
    pub fn extract_center(&self, range: [f64; 2], offset: f64, resolution: f64, up: Vector3) -> Vec<Vertex> {
        let mut out = Vec::new();
        self.extract_center_range(&mut out, range, offset, &ExtractConfig::new(resolution), up);
        out
    }

    /// Like [`ArcCurve::extract_center`], appending to `out`.
    ///
    /// # Errors
    /// As [`ArcCurve::extract_line_into`].
    pub fn extract_center_into(
        &self,
        out: &mut Vec<Vertex>,
        range: [f64; 2],
        offset: f64,
        config: &ExtractConfig,
        up: Vector3,
    ) -> Result<()> {
        config.check()?;
        self.extract_center_range(out, range, offset, config, up);
        Ok(())
    }

    fn extract_center_range(
        &self,
        out: &mut Vec<Vertex>,
        range: [f64; 2],
        offset: f64,
        config: &ExtractConfig,
        up: Vector3,
    ) {
        let first_new = out.len();
        let mapped = [
            self.parameter_map(range[0], offset),
            self.parameter_map(range[1], offset),
        ];
        self.extract_range(out, mapped, offset, config, up);
        for v in &mut out[first_new..] {
            v.tex_coord.x = self.inverse_parameter_map(v.tex_coord.x, offset);
        }
    }
}
