//! Tolerance-aware predicates on points, segments and small polygons.
//!
//! - `orientation`: three-valued turn direction of `(a, b, c)`.
//! - `betweenness`: where a collinear `c` sits relative to segment `ab`.
//! - `segments_intersect`, `line_intersection`: crossing test and crossing point.
//!
//! Code cross-refs: `part::ConvexPart::split_by_line`, `shape::Shape::select_parts_in_triangle`

use super::cfg::PARALLEL_EPS;
use super::types::{Point, Segment};

/// Turn direction of the triple `(a, b, c)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Position of a point `c` collinear with `a → b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Betweenness {
    /// `c` lies on the closed segment `ab`.
    Within,
    /// `b` lies between `a` and `c`. Also returned for `a ≈ b` with `c` elsewhere.
    PastEnd,
    /// `a` lies between `c` and `b`.
    BeforeStart,
}

#[inline]
fn cross(u: Point, v: Point) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Sign of `(b − a) × (c − a)`, judged by the distance of `c` from line `ab`.
///
/// A degenerate base (`|ab| <= tol`) is reported as `Collinear`.
pub fn orientation(a: Point, b: Point, c: Point, tol: f64) -> Orientation {
    let ab = b - a;
    let len = ab.norm();
    if len <= tol {
        return Orientation::Collinear;
    }
    let dist = cross(ab, c - a) / len;
    if dist > tol {
        Orientation::CounterClockwise
    } else if dist < -tol {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Betweenness of `c` for points already known to be collinear with `a → b`.
pub fn betweenness(a: Point, b: Point, c: Point, tol: f64) -> Betweenness {
    let ab = (b - a).norm();
    let ac = (c - a).norm();
    let bc = (c - b).norm();
    if ac + bc <= ab + tol {
        Betweenness::Within
    } else if ab + bc <= ac + tol {
        Betweenness::PastEnd
    } else {
        Betweenness::BeforeStart
    }
}

#[inline]
fn on_segment(s: &Segment, p: Point, tol: f64) -> bool {
    orientation(s.a, s.b, p, tol) == Orientation::Collinear
        && betweenness(s.a, s.b, p, tol) == Betweenness::Within
}

/// Closed segments share at least one point (within `tol`).
pub fn segments_intersect(s1: &Segment, s2: &Segment, tol: f64) -> bool {
    let o1 = orientation(s1.a, s1.b, s2.a, tol);
    let o2 = orientation(s1.a, s1.b, s2.b, tol);
    let o3 = orientation(s2.a, s2.b, s1.a, tol);
    let o4 = orientation(s2.a, s2.b, s1.b, tol);

    let straddles = |p: Orientation, q: Orientation| {
        p != q && p != Orientation::Collinear && q != Orientation::Collinear
    };
    if straddles(o1, o2) && straddles(o3, o4) {
        return true;
    }
    // touching or overlapping configurations
    on_segment(s1, s2.a, tol)
        || on_segment(s1, s2.b, tol)
        || on_segment(s2, s1.a, tol)
        || on_segment(s2, s1.b, tol)
}

/// Intersection of the infinite lines through `s1` and `s2` (determinant formula).
///
/// Returns `None` for parallel (or degenerate) lines instead of a huge coordinate.
pub fn line_intersection(s1: &Segment, s2: &Segment) -> Option<Point> {
    let d1 = s1.direction();
    let d2 = s2.direction();
    let denom = cross(d1, d2);
    let scale = d1.norm() * d2.norm();
    if !(scale.is_finite()) || scale == 0.0 || denom.abs() <= PARALLEL_EPS * scale {
        return None;
    }
    let k1 = cross(s1.a, s1.b);
    let k2 = cross(s2.a, s2.b);
    // line i: cross(p, d_i) = k_i; Cramer's rule
    let p = (d1 * k2 - d2 * k1) / denom;
    Some(p)
}

/// Arithmetic mean of the vertices (the centroid used for placement and selection).
pub fn vertex_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::zeros();
    }
    points.iter().sum::<Point>() / points.len() as f64
}

/// Shoelace area; positive for counter-clockwise loops.
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    0.5 * (0..n)
        .map(|i| cross(points[i], points[(i + 1) % n]))
        .sum::<f64>()
}

/// Convex counter-clockwise loop: no clockwise turn at any vertex and positive area.
pub fn is_convex(points: &[Point], tol: f64) -> bool {
    let n = points.len();
    if n < 3 || signed_area(points) <= 0.0 {
        return false;
    }
    (0..n).all(|i| {
        orientation(points[i], points[(i + 1) % n], points[(i + 2) % n], tol)
            != Orientation::Clockwise
    })
}

/// Closed containment of `p` in triangle `tri` (boundary inclusive, either winding).
///
/// A degenerate triangle contains nothing.
pub fn triangle_contains(tri: &[Point; 3], p: Point, tol: f64) -> bool {
    let [a, b, c] = *tri;
    if orientation(a, b, c, tol) == Orientation::Collinear {
        return false;
    }
    let signs = [
        orientation(a, b, p, tol),
        orientation(b, c, p, tol),
        orientation(c, a, p, tol),
    ];
    let has_ccw = signs.contains(&Orientation::CounterClockwise);
    let has_cw = signs.contains(&Orientation::Clockwise);
    !(has_ccw && has_cw)
}
