//! Tolerance defaults for the dissection engine.
//!
//! Policy
//! - Fixed process-wide constants; nothing mutates them during a run.
//! - Inputs are expected at roughly unit to 1e4 scale (the demo triangles
//!   have area 1e4).

/// Distance tolerance for coincidence, collinearity, vertex dedup and cut dedup.
pub const PRECISION: f64 = 1e-6;

/// Relative threshold on `|d1 × d2| / (|d1| |d2|)` below which two lines are parallel.
pub const PARALLEL_EPS: f64 = 1e-12;
