//! Shapes: one original polygon and its current dissection.
//!
//! Purpose
//! - Own the list of `ConvexPart`s, the history of applied cut lines and the
//!   canonical-form tag (`ShapeInfo`) that guards the pipeline stages.
//! - Whole-shape operations: cut every part by a world-space segment, select
//!   parts by centroid, rotate/translate a selection.
//!
//! Code cross-refs: `part::ConvexPart`, `pipeline`, `geom::CutKey`

use tracing::{debug, trace};

use crate::error::{DissectError, Result, ShapeKind};
use crate::geom::{is_convex, triangle_contains, CutKey, Point, Segment, PRECISION};
use crate::part::ConvexPart;

/// Axis-aligned triangle `(0,0), (base,0), (peak_x,height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleDims {
    pub base: f64,
    pub height: f64,
    pub peak_x: f64,
}

impl TriangleDims {
    /// Requires finite `base > 0`, `height > 0` and `0 <= peak_x <= base`.
    pub fn new(base: f64, height: f64, peak_x: f64) -> Result<Self> {
        let finite = base.is_finite() && height.is_finite() && peak_x.is_finite();
        if !finite || base <= 0.0 || height <= 0.0 {
            return Err(DissectError::InvalidDims(format!(
                "triangle base {base}, height {height} must be positive"
            )));
        }
        if !(0.0..=base).contains(&peak_x) {
            return Err(DissectError::InvalidDims(format!(
                "peak_x {peak_x} outside [0, {base}]"
            )));
        }
        Ok(Self {
            base,
            height,
            peak_x,
        })
    }

    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * self.base * self.height
    }

    #[inline]
    pub fn vertices(&self) -> [Point; 3] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.base, 0.0),
            Point::new(self.peak_x, self.height),
        ]
    }
}

/// Rectangle `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectDims {
    pub width: f64,
    pub height: f64,
}

impl RectDims {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(DissectError::InvalidDims(format!(
                "rectangle {width}x{height} must be positive"
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[inline]
    pub fn vertices(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
    }
}

/// Canonical form of a shape, checked by every pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeInfo {
    AxisAlignedTriangle(TriangleDims),
    Rectangle(RectDims),
}

impl ShapeInfo {
    #[inline]
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeInfo::AxisAlignedTriangle(_) => ShapeKind::AxisAlignedTriangle,
            ShapeInfo::Rectangle(_) => ShapeKind::Rectangle,
        }
    }
}

/// A polygon under dissection.
///
/// Invariants:
/// - `parts` only grows; a split replaces one part by its two children in place.
/// - Sum of part areas equals the initial polygon area.
#[derive(Clone, Debug)]
pub struct Shape {
    parts: Vec<ConvexPart>,
    cuts: Vec<CutKey>,
    info: Option<ShapeInfo>,
}

impl Shape {
    /// Build from a convex CCW vertex loop; the cut history is seeded with its edges.
    pub fn new(points: Vec<Point>, info: Option<ShapeInfo>) -> Result<Self> {
        let part = ConvexPart::new(points);
        let pts = part.points();
        if pts.len() < 3 {
            return Err(DissectError::DegeneratePolygon(pts.len()));
        }
        if !is_convex(pts, PRECISION) {
            return Err(DissectError::NotConvex);
        }
        let n = pts.len();
        let cuts = (0..n)
            .filter_map(|i| CutKey::from_segment(&Segment::new(pts[i], pts[(i + 1) % n])))
            .collect();
        Ok(Self {
            parts: vec![part],
            cuts,
            info,
        })
    }

    pub fn triangle(dims: TriangleDims) -> Result<Self> {
        Self::new(
            dims.vertices().to_vec(),
            Some(ShapeInfo::AxisAlignedTriangle(dims)),
        )
    }

    pub fn rectangle(dims: RectDims) -> Result<Self> {
        Self::new(dims.vertices().to_vec(), Some(ShapeInfo::Rectangle(dims)))
    }

    #[inline]
    pub fn parts(&self) -> &[ConvexPart] {
        &self.parts
    }

    #[inline]
    pub fn info(&self) -> Option<&ShapeInfo> {
        self.info.as_ref()
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.info.map_or(ShapeKind::Unknown, |i| i.kind())
    }

    #[inline]
    pub(crate) fn set_info(&mut self, info: ShapeInfo) {
        self.info = Some(info);
    }

    /// Number of distinct cut lines recorded (initial edges included).
    #[inline]
    pub fn cut_count(&self) -> usize {
        self.cuts.len()
    }

    /// Sum of part areas.
    pub fn area(&self) -> f64 {
        self.parts.iter().map(ConvexPart::area).sum()
    }

    /// World-space polygons of every part at interpolation `amount`.
    pub fn world_polygons(&self, amount: f64) -> Vec<Vec<Point>> {
        self.parts
            .iter()
            .map(|p| p.transformed_points(amount))
            .collect()
    }

    /// Cut every part by a world-space segment.
    ///
    /// Returns `false` (and changes nothing) if the same supporting line was
    /// cut before or the segment is degenerate. Parts the segment does not
    /// cleanly bisect are kept as they are.
    pub fn cut(&mut self, line: &Segment) -> bool {
        let Some(key) = CutKey::from_segment(line) else {
            trace!(?line, "degenerate cut skipped");
            return false;
        };
        if self.cuts.iter().any(|k| k.matches(&key, PRECISION)) {
            trace!(?line, "repeated cut skipped");
            return false;
        }
        self.cuts.push(key);

        let before = self.parts.len();
        let mut next = Vec::with_capacity(before * 2);
        for part in self.parts.drain(..) {
            match part.split_by_world_line(line) {
                Some((a, b)) => {
                    next.push(a);
                    next.push(b);
                }
                None => next.push(part),
            }
        }
        self.parts = next;
        debug!(before, after = self.parts.len(), "cut applied");
        true
    }

    /// Indices of parts whose placed vertex centroid lies in the closed triangle.
    pub fn select_parts_in_triangle(&self, triangle: &[Point; 3]) -> Vec<usize> {
        self.parts
            .iter()
            .enumerate()
            .filter(|(_, p)| triangle_contains(triangle, p.world_centroid(), PRECISION))
            .map(|(i, _)| i)
            .collect()
    }

    fn check_indices(&self, indices: &[usize]) -> Result<()> {
        let len = self.parts.len();
        match indices.iter().find(|&&i| i >= len) {
            Some(&index) => Err(DissectError::PartIndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    /// Rotate the selected parts about the world origin.
    pub fn rotate(&mut self, indices: &[usize], angle: f64) -> Result<()> {
        self.check_indices(indices)?;
        for &i in indices {
            self.parts[i].rotate(angle);
        }
        Ok(())
    }

    pub fn translate(&mut self, indices: &[usize], dx: f64, dy: f64) -> Result<()> {
        self.check_indices(indices)?;
        for &i in indices {
            self.parts[i].translate(dx, dy);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use std::f64::consts::PI;

    fn square() -> Shape {
        Shape::rectangle(RectDims::new(4.0, 4.0).unwrap()).unwrap()
    }

    #[test]
    fn construction_validates_polygon() {
        assert!(matches!(
            Shape::new(vec![vector![0.0, 0.0], vector![1.0, 0.0]], None),
            Err(DissectError::DegeneratePolygon(2))
        ));
        let cw = vec![vector![0.0, 0.0], vector![0.0, 1.0], vector![1.0, 0.0]];
        assert!(matches!(Shape::new(cw, None), Err(DissectError::NotConvex)));
        let s = square();
        assert_eq!(s.parts().len(), 1);
        assert_eq!(s.cut_count(), 4);
        assert_eq!(s.kind(), ShapeKind::Rectangle);
    }

    #[test]
    fn dims_validation() {
        assert!(TriangleDims::new(10.0, 5.0, 11.0).is_err());
        assert!(TriangleDims::new(-1.0, 5.0, 0.0).is_err());
        assert!(TriangleDims::new(10.0, 5.0, 10.0).is_ok());
        assert!(RectDims::new(0.0, 1.0).is_err());
        assert!((TriangleDims::new(100.0, 200.0, 40.0).unwrap().area() - 10000.0).abs() < 1e-9);
    }

    #[test]
    fn near_horizontal_recut_is_skipped() {
        let mut s = square();
        assert!(s.cut(&Segment::from_coords(-1.0, 2.0, 5.0, 2.0 + 5.4e-6)));
        let parts = s.parts().len();
        assert_eq!(parts, 2);
        assert!(!s.cut(&Segment::from_coords(-1.0, 2.0, 5.0, 2.0 + 6.6e-6)));
        assert!(!s.cut(&Segment::from_coords(5.0, 2.0 + 5.4e-6, -1.0, 2.0)));
        assert_eq!(s.parts().len(), parts);
    }

    #[test]
    fn cut_replaces_crossed_parts_in_order() {
        let mut s = square();
        assert!(s.cut(&Segment::from_coords(2.0, -1.0, 2.0, 5.0)));
        assert_eq!(s.parts().len(), 2);
        // horizontal cut through both halves
        assert!(s.cut(&Segment::from_coords(-1.0, 1.0, 5.0, 1.0)));
        assert_eq!(s.parts().len(), 4);
        // a cut that only reaches the right half
        assert!(s.cut(&Segment::from_coords(3.0, -1.0, 3.0, 2.0)));
        assert_eq!(s.parts().len(), 5);
        assert!((s.area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_and_edge_cuts_are_noops() {
        let mut s = square();
        assert!(s.cut(&Segment::from_coords(2.0, -1.0, 2.0, 5.0)));
        let parts = s.parts().to_vec();
        // same line, different endpoints
        assert!(!s.cut(&Segment::from_coords(2.0, 10.0, 2.0, 0.5)));
        assert_eq!(s.parts(), &parts[..]);
        // the boundary edge y = 0 is seeded in the history
        assert!(!s.cut(&Segment::from_coords(-3.0, 0.0, 7.0, 0.0)));
        assert!(!s.cut(&Segment::from_coords(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn select_and_move_parts() {
        let mut s = square();
        s.cut(&Segment::from_coords(-1.0, 5.0, 5.0, -1.0));
        assert_eq!(s.parts().len(), 2);
        let lower = s.select_parts_in_triangle(&[
            vector![0.0, 0.0],
            vector![4.0, 0.0],
            vector![0.0, 4.0],
        ]);
        assert_eq!(lower.len(), 1);
        s.rotate(&lower, PI).unwrap();
        s.translate(&lower, 4.0, 4.0).unwrap();
        // the lower-left half now covers the upper-right half
        let moved = &s.parts()[lower[0]];
        let c = moved.world_centroid();
        assert!((c - vector![8.0 / 3.0, 8.0 / 3.0]).norm() < 1e-9);
        let other = 1 - lower[0];
        assert!((s.parts()[other].world_centroid() - c).norm() < 1e-9);
    }

    #[test]
    fn out_of_range_index_mutates_nothing() {
        let mut s = square();
        s.cut(&Segment::from_coords(2.0, -1.0, 2.0, 5.0));
        let before = s.parts().to_vec();
        let err = s.translate(&[0, 7], 1.0, 1.0).unwrap_err();
        assert_eq!(err, DissectError::PartIndexOutOfRange { index: 7, len: 2 });
        assert_eq!(s.parts(), &before[..]);
        assert!(s.rotate(&[2], 1.0).is_err());
    }
}
