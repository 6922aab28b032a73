//! Constructive Bolyai–Gerwien dissections.
//!
//! Two triangles of equal area are cut into convex pieces; each piece carries
//! a rigid placement (rotation, then translation) that moves it from the
//! source triangle into the target. Placements can be interpolated for
//! animation.
//!
//! Layout
//! - `geom`: points, rigid motions, tolerance-aware predicates.
//! - `part`: `ConvexPart`, a convex piece plus its placement.
//! - `shape`: `Shape`, the dissection state of one polygon.
//! - `pipeline`: triangle → rectangle → wider rectangle → triangle.
//! - `rand`, `animate`: demo input and frame sampling.

pub mod animate;
pub mod api;
pub mod error;
pub mod geom;
pub mod part;
pub mod pipeline;
pub mod rand;
pub mod shape;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{DissectError, Result, ShapeKind};
pub use geom::{Point, Rigid2, Segment, PRECISION};
pub use part::ConvexPart;
pub use shape::{RectDims, Shape, ShapeInfo, TriangleDims};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::animate::{Frame, FrameSchedule};
    pub use crate::geom::{Point, Rigid2, Segment, PRECISION};
    pub use crate::part::ConvexPart;
    pub use crate::pipeline::ResizeCfg;
    pub use crate::rand::{random_dissection_input, random_triangle_pair, ReplayToken};
    pub use crate::shape::{RectDims, Shape, ShapeInfo, TriangleDims};
    pub use crate::{DissectError, Result};
}
