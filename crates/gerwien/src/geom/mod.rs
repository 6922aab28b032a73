//! Planar geometry for the dissection engine.
//!
//! Purpose
//! - Points, segments and rigid placements (`Rigid2`) shared by parts and shapes.
//! - Tolerance-aware predicates: orientation, betweenness, segment crossing,
//!   line intersection and a few polygon helpers.
//!
//! Conventions
//! - Polygons are vertex loops in counter-clockwise order.
//! - Every comparison goes through `PRECISION`; no exact float equality.
//!
//! Code cross-refs: `part::ConvexPart`, `shape::Shape`

pub mod cfg;
mod predicates;
mod types;

pub use cfg::{PARALLEL_EPS, PRECISION};
pub use predicates::{
    betweenness, is_convex, line_intersection, orientation, segments_intersect, signed_area,
    triangle_contains, vertex_centroid, Betweenness, Orientation,
};
pub use types::{approx_eq, CutKey, Point, Rigid2, Segment};
