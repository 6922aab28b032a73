//! Random axis-aligned triangles of a fixed area (demo input).
//!
//! Model
//! - Base is `20 + Gamma(k = 5, θ = 50)`, drawn as a sum of five exponentials.
//! - Height follows from the area; the apex abscissa is uniform on `[0, base)`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `shape::{Shape, TriangleDims}`, `pipeline::triangle_to_triangle`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::shape::{Shape, TriangleDims};

const BASE_OFFSET: f64 = 20.0;
const BASE_SHAPE: u32 = 5;
const BASE_SCALE: f64 = 50.0;

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Erlang draw: sum of `k` exponentials with mean `scale`.
fn gamma_integer_shape<R: Rng>(rng: &mut R, k: u32, scale: f64) -> f64 {
    (0..k)
        .map(|_| {
            // 1 - u lies in (0, 1], keeping ln finite
            let u: f64 = rng.gen();
            -scale * (1.0 - u).ln()
        })
        .sum()
}

fn draw_dims<R: Rng>(rng: &mut R, area: f64) -> Result<TriangleDims> {
    let base = BASE_OFFSET + gamma_integer_shape(rng, BASE_SHAPE, BASE_SCALE);
    let height = 2.0 * area / base;
    let peak_x = rng.gen::<f64>() * base;
    TriangleDims::new(base, height, peak_x)
}

/// Draw one triangle of the given area.
pub fn random_triangle(area: f64, tok: ReplayToken) -> Result<TriangleDims> {
    let mut rng = tok.to_std_rng();
    draw_dims(&mut rng, area)
}

/// Draw two triangles of equal area, ordered so the first has the smaller base.
pub fn random_triangle_pair(area: f64, tok: ReplayToken) -> Result<(TriangleDims, TriangleDims)> {
    let mut rng = tok.to_std_rng();
    let a = draw_dims(&mut rng, area)?;
    let b = draw_dims(&mut rng, area)?;
    Ok(if a.base > b.base { (b, a) } else { (a, b) })
}

/// Source shape ready for `triangle_to_triangle`, plus the target dimensions.
pub fn random_dissection_input(area: f64, tok: ReplayToken) -> Result<(Shape, TriangleDims)> {
    let (source, target) = random_triangle_pair(area, tok)?;
    Ok((Shape::triangle(source)?, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_is_deterministic() {
        let tok = ReplayToken::new(42, 3);
        assert_eq!(
            random_triangle(10000.0, tok).unwrap(),
            random_triangle(10000.0, tok).unwrap()
        );
        assert_ne!(
            random_triangle(10000.0, tok).unwrap(),
            random_triangle(10000.0, ReplayToken::new(42, 4)).unwrap()
        );
    }

    #[test]
    fn pairs_are_ordered_and_equal_area() {
        for index in 0..50 {
            let (a, b) = random_triangle_pair(10000.0, ReplayToken::new(7, index)).unwrap();
            assert!(a.base <= b.base);
            assert!(a.base >= BASE_OFFSET);
            assert!((a.area() - 10000.0).abs() < 1e-6);
            assert!((b.area() - 10000.0).abs() < 1e-6);
            assert!((0.0..=a.base).contains(&a.peak_x));
        }
    }
}
