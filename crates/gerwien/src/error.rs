//! Error type for shape construction and pipeline preconditions.
//!
//! Degenerate cuts are not errors: a part the cut does not cleanly bisect is
//! simply kept. Every variant here is raised before any state is mutated.

use thiserror::Error;

/// Shape kind as seen by precondition checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    AxisAlignedTriangle,
    Rectangle,
    Unknown,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ShapeKind::AxisAlignedTriangle => "axis-aligned triangle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Unknown => "untagged shape",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DissectError {
    #[error("expected {expected}, found {found}")]
    WrongShape { expected: ShapeKind, found: ShapeKind },

    #[error("source base {source_base} exceeds target base {target_base}")]
    SourceBaseTooLarge { source_base: f64, target_base: f64 },

    #[error("areas differ: source {source_area}, target {target_area}")]
    AreaMismatch { source_area: f64, target_area: f64 },

    #[error("target width {target} must exceed current width {width}")]
    TargetNotWider { width: f64, target: f64 },

    #[error("single resize step from width {width} to {target} exceeds doubling")]
    StepTooWide { width: f64, target: f64 },

    #[error("rectangle {width}x{height} does not match target triangle base {base}, height {height_target}")]
    RectangleMismatch {
        width: f64,
        height: f64,
        base: f64,
        height_target: f64,
    },

    #[error("invalid dimensions: {0}")]
    InvalidDims(String),

    #[error("polygon needs at least 3 distinct vertices, got {0}")]
    DegeneratePolygon(usize),

    #[error("polygon is not convex and counter-clockwise")]
    NotConvex,

    #[error("part index {index} out of range ({len} parts)")]
    PartIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, DissectError>;
