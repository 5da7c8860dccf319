//! Road surface meshes between two offset rails of an [`ArcCurve`].

use arcroad_core::{Result, RoadError};
use arcroad_curve::{ArcCurve, ExtractConfig};
use arcroad_math::Vector3;
use rayon::prelude::*;
use tracing::debug;

use crate::stitch::stitch_rails;
use crate::TriangleMesh;

/// Mesh the strip between rails `offsets[0]` and `offsets[1]` over the
/// centerline parameter range `range`, using the curve's up vector.
///
/// Vertex `uv.x` is the centerline parameter; `uv.y` is 0 on the first
/// rail and 1 on the second.
pub fn build_mesh(
    curve: &ArcCurve,
    range: [f64; 2],
    offsets: [f64; 2],
    resolution: f64,
) -> Result<TriangleMesh> {
    build_mesh_with(curve, range, offsets, &ExtractConfig::new(resolution), curve.up())
}

/// [`build_mesh`] with explicit extraction settings and up vector.
pub fn build_mesh_with(
    curve: &ArcCurve,
    range: [f64; 2],
    offsets: [f64; 2],
    config: &ExtractConfig,
    up: Vector3,
) -> Result<TriangleMesh> {
    if !range.iter().chain(&offsets).all(|x| x.is_finite()) {
        return Err(RoadError::InvalidParameter(format!(
            "mesh range {:?} and offsets {:?} must be finite",
            range, offsets
        )));
    }

    let mut mesh = TriangleMesh::default();
    let mut rails: [Vec<u32>; 2] = Default::default();
    let mut samples = Vec::new();
    for (side, (&offset, rail)) in offsets.iter().zip(rails.iter_mut()).enumerate() {
        samples.clear();
        curve.extract_center_into(&mut samples, range, offset, config, up)?;
        for v in &mut samples {
            v.tex_coord.y = side as f64;
            rail.push(mesh.push_vertex(v));
        }
    }

    for mut tri in stitch_rails(&mesh.positions, &rails[0], &rails[1]) {
        let vertex_up: Vector3 = tri.iter().map(|&i| mesh.normals[i as usize]).sum();
        if mesh.face_normal(tri).dot(vertex_up) < 0.0 {
            tri.swap(1, 2);
        }
        mesh.push_triangle(tri);
    }

    debug!(
        low = rails[0].len(),
        high = rails[1].len(),
        triangles = mesh.triangle_count(),
        "built road mesh"
    );
    Ok(mesh)
}

/// Mesh many curves in parallel with the same settings. Fails with the
/// first error encountered.
pub fn build_meshes(
    curves: &[ArcCurve],
    range: [f64; 2],
    offsets: [f64; 2],
    config: &ExtractConfig,
) -> Result<Vec<TriangleMesh>> {
    let meshes = curves
        .par_iter()
        .map(|curve| build_mesh_with(curve, range, offsets, config, curve.up()))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = meshes.len(), "built road meshes");
    Ok(meshes)
}
