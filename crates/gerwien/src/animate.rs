//! Frame schedule for animating a finished dissection.
//!
//! The renderer holds the untouched source for `pause_frames` frames, then
//! sweeps the interpolation amount from 0 to 1 over `frames` frames.

use crate::geom::Point;
use crate::shape::Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSchedule {
    pub frames: usize,
    pub pause_frames: usize,
}

impl Default for FrameSchedule {
    fn default() -> Self {
        Self {
            frames: 200,
            pause_frames: 100,
        }
    }
}

impl FrameSchedule {
    #[inline]
    pub fn total(&self) -> usize {
        self.frames + self.pause_frames
    }

    /// Interpolation amount for a frame index, clamped to `[0, 1]`.
    pub fn amount_at(&self, frame: usize) -> f64 {
        if frame < self.pause_frames {
            return 0.0;
        }
        if self.frames <= 1 {
            return 1.0;
        }
        let t = (frame - self.pause_frames) as f64 / (self.frames - 1) as f64;
        t.min(1.0)
    }

    /// Caption for a frame, e.g. `Transformation (42.00%)`.
    pub fn label_at(&self, frame: usize) -> String {
        if frame < self.pause_frames {
            "Initial Triangle".to_string()
        } else {
            format!("Transformation ({:.2}%)", self.amount_at(frame) * 100.0)
        }
    }
}

/// All part outlines at one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    pub index: usize,
    pub amount: f64,
    pub polygons: Vec<Vec<Point>>,
}

impl Shape {
    /// Sample every part at every frame of `schedule`.
    pub fn frames(&self, schedule: FrameSchedule) -> Vec<Frame> {
        (0..schedule.total())
            .map(|index| {
                let amount = schedule.amount_at(index);
                Frame {
                    index,
                    amount,
                    polygons: self.world_polygons(amount),
                }
            })
            .collect()
    }
}
