//! ArcRoad curves: arc-spline construction, arc-length indexing,
//! evaluation along offset rails, and adaptive polyline extraction.

pub mod config;
pub mod curve;
pub mod extract;
pub mod polyline;

pub use config::{CurveConfig, ExtractConfig};
pub use curve::{max_cornering_speed, ArcCurve, Curve, Feature, Joint};
pub use extract::Vertex;
pub use polyline::polyline_from_tangents;
