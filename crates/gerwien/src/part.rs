//! Convex pieces with a lazily applied rigid placement.
//!
//! Purpose
//! - A `ConvexPart` stores its vertices in a local frame and a `Rigid2`
//!   placement accumulated from every rotate/translate applied to it.
//! - Splitting happens in the local frame; world-space cuts are pulled back
//!   through the inverse placement first.
//!
//! Code cross-refs: `geom::{Rigid2, Segment, segments_intersect, line_intersection}`

use nalgebra::{Rotation2, Vector2};

use crate::geom::{
    line_intersection, orientation, segments_intersect, signed_area, vertex_centroid,
    Orientation, Point, Rigid2, Segment, PRECISION,
};

/// Convex polygon (CCW, local frame) plus its accumulated placement.
///
/// Invariants:
/// - No two cyclically consecutive vertices closer than `PRECISION`.
/// - `points` never carries the placement; it is applied on query.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPart {
    points: Vec<Point>,
    placement: Rigid2,
}

/// Drop consecutive near-duplicates, including the closing (last, first) pair.
fn dedup_cyclic(points: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().map_or(true, |q| (p - q).norm() > PRECISION) {
            out.push(p);
        }
    }
    while out.len() > 1 && (out[0] - out[out.len() - 1]).norm() <= PRECISION {
        out.pop();
    }
    out
}

impl ConvexPart {
    #[inline]
    pub fn new(points: Vec<Point>) -> Self {
        Self::with_placement(points, Rigid2::identity())
    }

    pub fn with_placement(points: Vec<Point>, placement: Rigid2) -> Self {
        Self {
            points: dedup_cyclic(points),
            placement,
        }
    }

    /// Local (untransformed) vertices.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn placement(&self) -> Rigid2 {
        self.placement
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.placement.angle
    }

    #[inline]
    pub fn translation(&self) -> Vector2<f64> {
        self.placement.t
    }

    /// Area of the piece (placement preserves it).
    #[inline]
    pub fn area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Interpolated placement of `points` for `amount ∈ [0, 1]`.
    ///
    /// Each point turns about the original vertex centroid by `angle·amount`
    /// while the centroid moves linearly towards its fully placed position.
    /// `amount = 0` returns the points unchanged, `amount = 1` equals
    /// `placement.apply(p)`.
    pub fn transform(&self, points: &[Point], amount: f64) -> Vec<Point> {
        let c = vertex_centroid(points);
        let c_final = self.placement.apply(c);
        let c_interp = c + (c_final - c) * amount;
        let rot = Rotation2::new(self.placement.angle * amount);
        points.iter().map(|p| rot * (p - c) + c_interp).collect()
    }

    /// World-space vertices at interpolation `amount`.
    #[inline]
    pub fn transformed_points(&self, amount: f64) -> Vec<Point> {
        self.transform(&self.points, amount)
    }

    /// Map world points back into the local frame (undo translation, then rotation).
    pub fn inverse_transform(&self, points: &[Point]) -> Vec<Point> {
        points
            .iter()
            .map(|q| self.placement.apply_inverse(*q))
            .collect()
    }

    /// Vertex centroid of the fully placed piece.
    #[inline]
    pub fn world_centroid(&self) -> Point {
        self.placement.apply(vertex_centroid(&self.points))
    }

    /// Split by a cut segment given in the local frame.
    ///
    /// Returns `None` unless the segment crosses the boundary at exactly two
    /// distinct points; an edge lying on the cut line also yields `None`.
    /// Both children inherit the parent's placement.
    pub fn split_by_line(&self, cut: &Segment) -> Option<(ConvexPart, ConvexPart)> {
        let n = self.points.len();
        if n < 3 {
            return None;
        }
        let mut crossings: Vec<(usize, Point)> = Vec::with_capacity(2);
        for i in 0..n {
            let edge = Segment::new(self.points[i], self.points[(i + 1) % n]);
            if !segments_intersect(&edge, cut, PRECISION) {
                continue;
            }
            let on_line =
                |p: Point| orientation(cut.a, cut.b, p, PRECISION) == Orientation::Collinear;
            if on_line(edge.a) && on_line(edge.b) {
                return None;
            }
            let Some(x) = line_intersection(&edge, cut) else {
                continue;
            };
            if crossings.iter().all(|(_, y)| (x - y).norm() > PRECISION) {
                crossings.push((i, x));
            }
        }
        let [(i1, x1), (i2, x2)] = crossings[..] else {
            return None;
        };

        let mut first: Vec<Point> = Vec::with_capacity(n + 2);
        first.extend_from_slice(&self.points[..=i1]);
        first.push(x1);
        first.push(x2);
        first.extend_from_slice(&self.points[i2 + 1..]);

        let mut second: Vec<Point> = Vec::with_capacity(i2 - i1 + 2);
        second.push(x1);
        second.extend_from_slice(&self.points[i1 + 1..=i2]);
        second.push(x2);

        let first = ConvexPart::with_placement(first, self.placement);
        let second = ConvexPart::with_placement(second, self.placement);
        if first.points.len() < 3 || second.points.len() < 3 {
            return None;
        }
        Some((first, second))
    }

    /// Split by a cut segment given in world space.
    pub fn split_by_world_line(&self, cut: &Segment) -> Option<(ConvexPart, ConvexPart)> {
        let local = cut.map(|p| self.placement.apply_inverse(p));
        self.split_by_line(&local)
    }

    /// Rotate the placed piece about the world origin; the stored offset turns too.
    #[inline]
    pub fn rotate(&mut self, angle: f64) {
        self.placement = self.placement.rotate_by(angle);
    }

    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.placement = self.placement.translate_by(Vector2::new(dx, dy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::is_convex;
    use nalgebra::vector;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn unit_square(side: f64) -> ConvexPart {
        ConvexPart::new(vec![
            vector![0.0, 0.0],
            vector![side, 0.0],
            vector![side, side],
            vector![0.0, side],
        ])
    }

    #[test]
    fn dedup_drops_consecutive_and_closing_duplicates() {
        let part = ConvexPart::new(vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1e-9],
            vector![1.0, 1.0],
            vector![1e-9, 0.0],
        ]);
        assert_eq!(part.points().len(), 3);
    }

    #[test]
    fn split_square_through_middle() {
        let sq = unit_square(2.0);
        let (a, b) = sq
            .split_by_line(&Segment::from_coords(1.0, -1.0, 1.0, 3.0))
            .expect("vertical cut bisects");
        assert!((a.area() - 2.0).abs() < 1e-12);
        assert!((b.area() - 2.0).abs() < 1e-12);
        assert!(is_convex(a.points(), PRECISION));
        assert!(is_convex(b.points(), PRECISION));
    }

    #[test]
    fn split_through_opposite_vertices() {
        let sq = unit_square(2.0);
        let (a, b) = sq
            .split_by_line(&Segment::from_coords(-1.0, -1.0, 3.0, 3.0))
            .expect("diagonal cut");
        assert_eq!(a.points().len(), 3);
        assert_eq!(b.points().len(), 3);
        assert!((a.area() + b.area() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn split_rejects_touching_short_and_collinear_cuts() {
        let sq = unit_square(2.0);
        // touches a single vertex
        assert!(sq
            .split_by_line(&Segment::from_coords(-1.0, 1.0, 1.0, -1.0))
            .is_none());
        // ends inside the square: one crossing only
        assert!(sq
            .split_by_line(&Segment::from_coords(1.0, -1.0, 1.0, 1.0))
            .is_none());
        // runs along an edge
        assert!(sq
            .split_by_line(&Segment::from_coords(-1.0, 0.0, 3.0, 0.0))
            .is_none());
        // misses entirely
        assert!(sq
            .split_by_line(&Segment::from_coords(5.0, -1.0, 5.0, 3.0))
            .is_none());
    }

    #[test]
    fn children_inherit_placement() {
        let mut sq = unit_square(2.0);
        sq.rotate(0.4);
        sq.translate(3.0, -2.0);
        let (a, b) = sq
            .split_by_line(&Segment::from_coords(1.0, -1.0, 1.0, 3.0))
            .unwrap();
        assert_eq!(a.placement(), sq.placement());
        assert_eq!(b.placement(), sq.placement());
    }

    #[test]
    fn world_split_matches_local_split_after_motion() {
        let mut sq = unit_square(2.0);
        sq.rotate(FRAC_PI_2);
        sq.translate(10.0, 0.0);
        // square now occupies [8, 10] x [0, 2]; cut it at x = 9
        let (a, b) = sq
            .split_by_world_line(&Segment::from_coords(9.0, -5.0, 9.0, 5.0))
            .expect("world cut bisects");
        for part in [&a, &b] {
            let xs: Vec<f64> = part.transformed_points(1.0).iter().map(|p| p.x).collect();
            let lo = xs.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!((hi - lo - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn transform_endpoints() {
        let mut sq = unit_square(1.0);
        sq.rotate(-PI);
        sq.translate(4.0, 1.0);
        let at0 = sq.transformed_points(0.0);
        for (p, q) in at0.iter().zip(sq.points()) {
            assert!((p - q).norm() < 1e-12);
        }
        let at1 = sq.transformed_points(1.0);
        for (p, q) in at1.iter().zip(sq.points()) {
            assert!((p - sq.placement().apply(*q)).norm() < 1e-12);
        }
        // halfway: centroid halfway between start and end
        let mid = vertex_centroid(&sq.transformed_points(0.5));
        let start = vertex_centroid(sq.points());
        let end = sq.world_centroid();
        assert!((mid - (start + end) * 0.5).norm() < 1e-12);
    }

    #[test]
    fn inverse_transform_undoes_placement() {
        let mut sq = unit_square(1.0);
        sq.translate(1.0, 2.0);
        sq.rotate(0.7);
        let world = sq.transformed_points(1.0);
        let back = sq.inverse_transform(&world);
        for (p, q) in back.iter().zip(sq.points()) {
            assert!((p - q).norm() < 1e-12);
        }
    }

    #[test]
    fn rotate_turns_stored_translation() {
        let mut sq = unit_square(1.0);
        sq.translate(1.0, 0.0);
        sq.rotate(FRAC_PI_2);
        assert!((sq.translation() - vector![0.0, 1.0]).norm() < 1e-12);
        assert!((sq.rotation() - FRAC_PI_2).abs() < 1e-15);
    }
}
