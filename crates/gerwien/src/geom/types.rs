//! Basic planar types: points, segments, rigid placements and cut keys.
//!
//! - `Rigid2`: rotation about the origin followed by a translation, with an
//!   unnormalized accumulated angle so interpolation can replay whole turns.
//! - `CutKey`: canonical supporting line of a segment, used for cut dedup.

use nalgebra::{Rotation2, Vector2};

use super::cfg::PRECISION;

/// A point (or displacement) in the plane.
pub type Point = Vector2<f64>;

/// Relative comparison used for dimensions (widths, heights, areas).
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= PRECISION * 1f64.max(a.abs()).max(b.abs())
}

/// Closed segment `a → b`. Cuts are segments too: only edges the segment reaches are crossed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
    #[inline]
    pub fn from_coords(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self::new(Point::new(ax, ay), Point::new(bx, by))
    }
    #[inline]
    pub fn direction(&self) -> Point {
        self.b - self.a
    }
    /// Image of both endpoints under `f`.
    #[inline]
    pub fn map(&self, f: impl Fn(Point) -> Point) -> Self {
        Self::new(f(self.a), f(self.b))
    }
}

/// Rigid motion `p ↦ R(angle)·p + t` (no reflection, no scaling).
///
/// `angle` accumulates: two half turns are stored as `2π`, not `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rigid2 {
    pub angle: f64,
    pub t: Vector2<f64>,
}

impl Default for Rigid2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Rigid2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            angle: 0.0,
            t: Vector2::zeros(),
        }
    }
    #[inline]
    pub fn rotation(angle: f64) -> Self {
        Self {
            angle,
            t: Vector2::zeros(),
        }
    }
    #[inline]
    pub fn translation(t: Vector2<f64>) -> Self {
        Self { angle: 0.0, t }
    }
    #[inline]
    pub fn rotation_matrix(&self) -> Rotation2<f64> {
        Rotation2::new(self.angle)
    }
    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        self.rotation_matrix() * p + self.t
    }
    /// `R(−angle)·(q − t)`.
    #[inline]
    pub fn apply_inverse(&self, q: Point) -> Point {
        self.inverse().apply(q)
    }
    #[inline]
    pub fn inverse(&self) -> Self {
        let r_inv = self.rotation_matrix().inverse();
        Self {
            angle: -self.angle,
            t: -(r_inv * self.t),
        }
    }
    /// Composition `self ∘ other` (apply `other` first).
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            angle: self.angle + other.angle,
            t: self.rotation_matrix() * other.t + self.t,
        }
    }
    /// Rotate the already placed figure about the world origin.
    ///
    /// The stored offset turns with it: `rotation(a) ∘ self`.
    #[inline]
    pub fn rotate_by(&self, angle: f64) -> Self {
        Self::rotation(angle).compose(self)
    }
    #[inline]
    pub fn translate_by(&self, d: Vector2<f64>) -> Self {
        Self::translation(d).compose(self)
    }
}

/// Canonical supporting line `n·x = c` of a cut (unit `n`, sign fixed).
///
/// Plays the role of a `(slope, intercept)` pair but also covers vertical lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutKey {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl CutKey {
    /// `None` for a segment shorter than `PRECISION`.
    pub fn from_segment(seg: &Segment) -> Option<Self> {
        let d = seg.direction();
        let len = d.norm();
        if !len.is_finite() || len <= PRECISION {
            return None;
        }
        let mut n = Vector2::new(d.y, -d.x) / len;
        if n.x < 0.0 || (n.x == 0.0 && n.y < 0.0) {
            n = -n;
        }
        Some(Self { n, c: n.dot(&seg.a) })
    }

    /// Same line within `tol`, for either orientation of the stored normal.
    ///
    /// Near-horizontal lines can land on either side of the sign convention.
    #[inline]
    pub fn matches(&self, other: &CutKey, tol: f64) -> bool {
        let same = (self.n - other.n).norm() <= tol && (self.c - other.c).abs() <= tol;
        let flipped = (self.n + other.n).norm() <= tol && (self.c + other.c).abs() <= tol;
        same || flipped
    }
}
