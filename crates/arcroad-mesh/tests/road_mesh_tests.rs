use arcroad_curve::{ArcCurve, ExtractConfig};
use arcroad_math::{DVec3, Point3};
use arcroad_mesh::{build_mesh, build_mesh_with, build_meshes, stitch_rails, TriangleMesh};

fn dvec3(x: f64, y: f64, z: f64) -> Point3 {
    DVec3::new(x, y, z)
}

fn junction_approach() -> ArcCurve {
    let pts = vec![
        dvec3(0.0, 0.0, 0.0),
        dvec3(30.0, 0.0, 0.0),
        dvec3(45.0, 20.0, 0.0),
        dvec3(45.0, 50.0, 0.0),
    ];
    ArcCurve::from_polyline(&pts, 0.9).unwrap()
}

#[test]
fn test_uniform_rails_make_a_strip() {
    let count = 8;
    let mut positions = Vec::new();
    for i in 0..count {
        positions.push(dvec3(f64::from(i), 0.0, 0.0));
    }
    for i in 0..count {
        positions.push(dvec3(f64::from(i), 3.0, 0.0));
    }
    let low: Vec<u32> = (0..count).collect();
    let high: Vec<u32> = (count..2 * count).collect();

    let faces = stitch_rails(&positions, &low, &high);
    assert_eq!(faces.len(), 2 * (count as usize - 1));
}

#[test]
fn test_road_mesh_covers_the_road() {
    let curve = junction_approach();
    let mesh = build_mesh(&curve, [0.0, 1.0], [-3.5, 3.5], 0.2).unwrap();
    assert_eq!(mesh.triangle_count(), mesh.vertex_count() - 2);

    let bb = mesh.bounding_box();
    assert!(bb.min.x <= 0.0 && bb.max.x >= 45.0);
    assert!(bb.min.y <= -3.5 + 1e-9 && bb.max.y >= 50.0 - 1e-9);

    for tri in mesh.triangles() {
        assert!(mesh.face_normal(tri).z > 0.0);
    }
}

#[test]
fn test_recomputed_normals_match_up() {
    let curve = junction_approach();
    let mut mesh = build_mesh(&curve, [0.0, 1.0], [-2.0, 2.0], 0.5).unwrap();
    mesh.compute_normals();
    for n in &mesh.normals {
        assert!((*n - DVec3::Z).length() < 1e-9, "normal {:?} is not +Z", n);
    }
}

#[test]
fn test_adjacent_ranges_merge_into_one_surface() {
    let curve = junction_approach();
    let config = ExtractConfig::new(0.2);
    let first = build_mesh_with(&curve, [0.0, 0.5], [-2.0, 2.0], &config, DVec3::Z).unwrap();
    let second = build_mesh_with(&curve, [0.5, 1.0], [-2.0, 2.0], &config, DVec3::Z).unwrap();

    let mut combined = TriangleMesh::default();
    combined.merge(&first);
    combined.merge(&second);
    assert_eq!(
        combined.triangle_count(),
        first.triangle_count() + second.triangle_count()
    );

    // The seam cross-section is shared by both pieces.
    let seam_u = |mesh: &TriangleMesh| mesh.uvs.iter().map(|uv| uv.x).fold(f64::NAN, f64::max);
    assert!((seam_u(&first) - 0.5).abs() < 1e-9);
    let start_u = second.uvs.iter().map(|uv| uv.x).fold(f64::NAN, f64::min);
    assert!((start_u - 0.5).abs() < 1e-9);
}

#[test]
fn test_batch_meshing() {
    let mut curves = Vec::new();
    for k in 0..6 {
        let mut curve = junction_approach();
        curve.translate(DVec3::new(100.0 * f64::from(k), 0.0, 0.0));
        curves.push(curve);
    }
    let meshes = build_meshes(&curves, [0.0, 1.0], [-1.0, 1.0], &ExtractConfig::new(0.5)).unwrap();
    assert_eq!(meshes.len(), curves.len());
    for (k, mesh) in meshes.iter().enumerate() {
        let bb = mesh.bounding_box();
        assert!(bb.min.x >= 100.0 * k as f64 - 1.0 - 1e-9);
        assert_eq!(mesh.triangle_count(), meshes[0].triangle_count());
    }
}

#[test]
fn test_sharp_corner_road() {
    let pts = vec![dvec3(0.0, 0.0, 0.0), dvec3(10.0, 0.0, 0.0), dvec3(10.0, 10.0, 0.0)];
    let curve = ArcCurve::from_polyline(&pts, 0.0).unwrap();
    let mesh = build_mesh(&curve, [0.0, 1.0], [-1.0, 1.0], 0.05).unwrap();
    assert_eq!(mesh.triangle_count(), mesh.vertex_count() - 2);

    for side in [0.0, 1.0] {
        let rail: Vec<f64> = mesh
            .uvs
            .iter()
            .filter(|uv| uv.y == side)
            .map(|uv| uv.x)
            .collect();
        assert!(rail.len() >= 3);
        assert!(rail.windows(2).all(|w| w[0] <= w[1] + 1e-12), "rail {} runs backwards", side);
        assert!((rail[rail.len() - 1] - 1.0).abs() < 1e-9);
    }
}
