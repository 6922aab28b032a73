//! Bolyai–Gerwien pipeline: triangle → rectangle → wider rectangle → triangle.
//!
//! Model
//! - Every stage is a fixed pattern of world-space cuts followed by rigid
//!   moves of the parts selected by centroid.
//! - Stages check the `ShapeInfo` tag and numeric preconditions first and
//!   return an error before touching any part.
//!
//! Conventions
//! - Triangles are `(0,0), (base,0), (peak_x,height)`; rectangles sit on the
//!   origin. Every stage leaves the result in that canonical position.
//!
//! Code cross-refs: `shape::{Shape, ShapeInfo}`, `part::ConvexPart`

use std::f64::consts::PI;

use tracing::{debug, instrument};

use crate::error::{DissectError, Result, ShapeKind};
use crate::geom::{approx_eq, Point, Segment};
use crate::shape::{RectDims, Shape, ShapeInfo, TriangleDims};

/// Knobs for widening a rectangle in several bounded steps.
#[derive(Clone, Copy, Debug)]
pub struct ResizeCfg {
    /// Width multiplier for intermediate steps; must lie in `(1, 2]`.
    pub growth_ratio: f64,
    /// Upper bound on how far the horizontal cut runs past the diagonal.
    pub max_overshoot: f64,
}

impl Default for ResizeCfg {
    fn default() -> Self {
        Self {
            growth_ratio: 1.5,
            max_overshoot: 0.1,
        }
    }
}

#[inline]
fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

impl Shape {
    fn expect_triangle(&self) -> Result<TriangleDims> {
        match self.info() {
            Some(ShapeInfo::AxisAlignedTriangle(dims)) => Ok(*dims),
            _ => Err(DissectError::WrongShape {
                expected: ShapeKind::AxisAlignedTriangle,
                found: self.kind(),
            }),
        }
    }

    fn expect_rectangle(&self) -> Result<RectDims> {
        match self.info() {
            Some(ShapeInfo::Rectangle(dims)) => Ok(*dims),
            _ => Err(DissectError::WrongShape {
                expected: ShapeKind::Rectangle,
                found: self.kind(),
            }),
        }
    }

    /// Fold the upper half of an axis-aligned triangle down into a `base × height/2` rectangle.
    ///
    /// The upper triangle is split at the apex abscissa; each half turns by
    /// −π and lands in the matching lower corner.
    #[instrument(skip(self), fields(parts = self.parts().len()))]
    pub fn triangle_to_rectangle(&mut self) -> Result<RectDims> {
        let TriangleDims {
            base,
            height,
            peak_x,
        } = self.expect_triangle()?;
        let half = height / 2.0;
        let rect = RectDims::new(base, half)?;

        self.cut(&Segment::from_coords(0.0, half, base, half));
        self.cut(&Segment::from_coords(peak_x, half, peak_x, height));

        let left = self.select_parts_in_triangle(&[
            pt(0.0, half),
            pt(peak_x, half),
            pt(peak_x, height + 1.0),
        ]);
        self.rotate(&left, -PI)?;
        self.translate(&left, peak_x, height)?;

        let right = self.select_parts_in_triangle(&[
            pt(base + 1.0, half),
            pt(peak_x, half),
            pt(peak_x, height + 1.0),
        ]);
        self.rotate(&right, -PI)?;
        self.translate(&right, base + peak_x, height)?;

        debug!(?left, ?right, width = base, height = half, "folded to rectangle");
        self.set_info(ShapeInfo::Rectangle(rect));
        Ok(rect)
    }

    /// One widening step `w × h → target × (h·w/target)`, valid for `w < target <= 2w`.
    pub fn cut_rectangle_to_rectangle_once(&mut self, target_width: f64) -> Result<RectDims> {
        self.resize_step(target_width, &ResizeCfg::default())
    }

    #[instrument(skip(self, cfg), fields(parts = self.parts().len()))]
    fn resize_step(&mut self, target_width: f64, cfg: &ResizeCfg) -> Result<RectDims> {
        let RectDims {
            width: w,
            height: h,
        } = self.expect_rectangle()?;
        if !(target_width > w) || approx_eq(target_width, w) {
            return Err(DissectError::TargetNotWider {
                width: w,
                target: target_width,
            });
        }
        if target_width > 2.0 * w && !approx_eq(target_width, 2.0 * w) {
            return Err(DissectError::StepTooWide {
                width: w,
                target: target_width,
            });
        }
        let th = h * w / target_width;
        let next = RectDims::new(target_width, th)?;

        // diagonal (0,h) → (W,0) meets y = th at x = W − w
        let meet_x = target_width - w;
        let overshoot = cfg
            .max_overshoot
            .min((2.0 * w - target_width) / 2.0)
            .max(0.0);
        self.cut(&Segment::from_coords(0.0, h, target_width, 0.0));
        self.cut(&Segment::from_coords(-1.0, th, meet_x + overshoot, th));

        let lower_corner =
            self.select_parts_in_triangle(&[pt(0.0, h), pt(0.0, th), pt(meet_x, th)]);
        self.translate(&lower_corner, w, -th)?;

        let y_past = h * (1.0 - (w + 1.0) / target_width);
        let upper_corner =
            self.select_parts_in_triangle(&[pt(0.0, h), pt(w, h), pt(w + 1.0, y_past)]);
        self.translate(&upper_corner, target_width - w, th - h)?;

        debug!(
            ?lower_corner,
            ?upper_corner,
            width = target_width,
            height = th,
            "widened rectangle"
        );
        self.set_info(ShapeInfo::Rectangle(next));
        Ok(next)
    }

    /// Widen to `target_width` with the default step policy.
    pub fn rectangle_to_fixed_width_rectangle(&mut self, target_width: f64) -> Result<RectDims> {
        self.rectangle_to_fixed_width_rectangle_with_cfg(target_width, ResizeCfg::default())
    }

    /// Widen in steps of `growth_ratio` while below half the target, then finish exactly.
    #[instrument(skip(self, cfg))]
    pub fn rectangle_to_fixed_width_rectangle_with_cfg(
        &mut self,
        target_width: f64,
        cfg: ResizeCfg,
    ) -> Result<RectDims> {
        let RectDims { width, .. } = self.expect_rectangle()?;
        if !(target_width > width) || approx_eq(target_width, width) {
            return Err(DissectError::TargetNotWider {
                width,
                target: target_width,
            });
        }
        if !(cfg.growth_ratio > 1.0 && cfg.growth_ratio <= 2.0) {
            return Err(DissectError::InvalidDims(format!(
                "growth ratio {} outside (1, 2]",
                cfg.growth_ratio
            )));
        }
        let mut current = width;
        let mut steps = 0usize;
        while current < target_width / 2.0 {
            current = self.resize_step(current * cfg.growth_ratio, &cfg)?.width;
            steps += 1;
        }
        let rect = self.resize_step(target_width, &cfg)?;
        debug!(steps = steps + 1, parts = self.parts().len(), "resize done");
        Ok(rect)
    }

    /// Fold the two outer corners of a `base × height/2` rectangle up into `target`.
    ///
    /// Mirror image of `triangle_to_rectangle`.
    #[instrument(skip(self), fields(parts = self.parts().len()))]
    pub fn rectangle_to_triangle(&mut self, target: &TriangleDims) -> Result<TriangleDims> {
        let rect = self.expect_rectangle()?;
        let TriangleDims {
            base: b,
            height: t,
            peak_x: p,
        } = *target;
        let half = t / 2.0;
        if !approx_eq(rect.width, b) || !approx_eq(rect.height, half) {
            return Err(DissectError::RectangleMismatch {
                width: rect.width,
                height: rect.height,
                base: b,
                height_target: t,
            });
        }

        self.cut(&Segment::from_coords(0.0, 0.0, p / 2.0, half));
        self.cut(&Segment::from_coords((p + b) / 2.0, half, b, 0.0));

        let left =
            self.select_parts_in_triangle(&[pt(0.0, 0.0), pt(0.0, half), pt(p / 2.0, half)]);
        self.rotate(&left, -PI)?;
        self.translate(&left, p, t)?;

        let right =
            self.select_parts_in_triangle(&[pt((b + p) / 2.0, half), pt(b, half), pt(b, 0.0)]);
        self.translate(&right, -(b + p), -t)?;
        self.rotate(&right, -PI)?;

        debug!(?left, ?right, "folded to triangle");
        self.set_info(ShapeInfo::AxisAlignedTriangle(*target));
        Ok(*target)
    }

    /// Dissect this triangle into `target` (equal area, `base <= target.base`).
    #[instrument(skip(self))]
    pub fn triangle_to_triangle(&mut self, target: &TriangleDims) -> Result<TriangleDims> {
        let source = self.expect_triangle()?;
        if source.base > target.base && !approx_eq(source.base, target.base) {
            return Err(DissectError::SourceBaseTooLarge {
                source_base: source.base,
                target_base: target.base,
            });
        }
        if !approx_eq(source.area(), target.area()) {
            return Err(DissectError::AreaMismatch {
                source_area: source.area(),
                target_area: target.area(),
            });
        }
        // rectangle handed to the final fold; equal bases skip the resize
        let (width, height) = if approx_eq(source.base, target.base) {
            (source.base, source.height / 2.0)
        } else {
            (target.base, source.area() / target.base)
        };
        if !approx_eq(width, target.base) || !approx_eq(height, target.height / 2.0) {
            return Err(DissectError::RectangleMismatch {
                width,
                height,
                base: target.base,
                height_target: target.height,
            });
        }

        // stages run on a copy so a late failure leaves `self` untouched
        let mut work = self.clone();
        let rect = work.triangle_to_rectangle()?;
        if !approx_eq(rect.width, target.base) {
            work.rectangle_to_fixed_width_rectangle(target.base)?;
        }
        let done = work.rectangle_to_triangle(target)?;
        *self = work;
        debug!(parts = self.parts().len(), "triangle to triangle done");
        Ok(done)
    }
}
