//! Seeded randomness for tree generation
//!
//! One `RandomSource` is created per build and threaded through the
//! recursion by `&mut`. Scalar draws advance the generator, so the order of
//! calls is part of the reproducibility contract: the same seed and the same
//! call sequence always give the same tree.

use std::cmp::Ordering;

use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded scalar generator plus a coherent 2D noise field
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: StdRng,
    field: Perlin,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            field: Perlin::new(fold_seed(seed)),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform scalar in `[lo, hi)`. A degenerate range returns `lo`.
    /// Reversed bounds are swapped.
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        match hi.partial_cmp(&lo) {
            Some(Ordering::Greater) => self.rng.random_range(lo..hi),
            Some(Ordering::Less) => self.rng.random_range(hi..lo),
            _ => lo,
        }
    }

    /// Uniform integer in `[lo, hi)`.
    ///
    /// `lo == hi` yields `lo`. An inverted range (`hi < lo`) has no defined
    /// draw and returns `None`; callers decide what that means.
    pub fn uniform_int(&mut self, lo: i32, hi: i32) -> Option<i32> {
        match hi.cmp(&lo) {
            Ordering::Greater => Some(self.rng.random_range(lo..hi)),
            Ordering::Equal => Some(lo),
            Ordering::Less => None,
        }
    }

    /// Smooth noise in `[0, 1]`.
    ///
    /// Pure in `(x, y)`: it never touches the scalar generator. Sampling with
    /// a large offset on one axis gives a second, uncorrelated channel.
    pub fn noise2d(&self, x: f32, y: f32) -> f32 {
        let v = self.field.get([x as f64, y as f64]) as f32;
        (v * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}
