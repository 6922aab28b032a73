//! Curated surface for renderers and the CLI.
//!
//! - Prefer these re-exports over reaching into submodules.
//! - Breaking changes are fine while the crate is internal to the workspace.

// geometry
pub use crate::geom::{
    betweenness, line_intersection, orientation, segments_intersect, signed_area,
    triangle_contains, vertex_centroid, Betweenness, CutKey, Orientation, Point, Rigid2,
    Segment, PRECISION,
};
// dissection state
pub use crate::part::ConvexPart;
pub use crate::pipeline::ResizeCfg;
pub use crate::shape::{RectDims, Shape, ShapeInfo, TriangleDims};
// demo input and animation
pub use crate::animate::{Frame, FrameSchedule};
pub use crate::rand::{random_dissection_input, random_triangle, random_triangle_pair, ReplayToken};
// errors
pub use crate::error::{DissectError, Result, ShapeKind};
