//! ArcRoad meshing: triangle meshes, rail stitching, and road surfaces.

pub mod road;
pub mod stitch;
pub mod triangulate;

pub use road::{build_mesh, build_mesh_with, build_meshes};
pub use stitch::stitch_rails;
pub use triangulate::TriangleMesh;
