//! Count-Min Sketch (Cormode & Muthukrishnan, 2003).
//!
//! Point query is the minimum over `d` hashed rows, so the estimate never
//! underestimates the true count. Error is bounded above by `epsilon * N`
//! with probability `1 - delta`, where `N` is the total weight ingested.
//!
//! Layout is a flat row-major `Vec` (`depth * width`, one allocation, good
//! cache locality) with a power-of-two width and bitmask instead of modulo.
//! Each row uses an independently sampled multiply-shift `(a, b)` pair,
//! giving genuinely 2-independent per-row hash functions drawn from the
//! PRNG at construction time.

use super::{FrequencySketch, COUNT_MIN_DEPTH_BASE, COUNT_MIN_WIDTH_BASE};
use crate::common::{validate_dimension_override, validate_probability, HhError};
use crate::hash;
use crate::prng::Prng;

/// A count-min sketch over non-negative integer weights.
#[derive(Clone, Debug)]
pub struct CountMinSketch {
    width: usize,
    log2_width: u32,
    depth: usize,
    table: Vec<i64>,
    hash_params: Vec<(u32, u32)>,
}

impl CountMinSketch {
    /// Builds a count-min sketch sized from `(epsilon, delta)`:
    /// `w = ceil(e/epsilon)` rounded up to a power of two, `d =
    /// ceil(log_2(1/delta))`.
    pub fn new(epsilon: f64, delta: f64, prng: &mut Prng) -> Result<Self, HhError> {
        validate_probability(epsilon, "epsilon")?;
        validate_probability(delta, "delta")?;

        let width = ((COUNT_MIN_WIDTH_BASE / epsilon).ceil() as usize)
            .max(1)
            .next_power_of_two();
        let depth = (((1.0 / delta).ln() / COUNT_MIN_DEPTH_BASE.ln()).ceil() as usize).max(1);

        Self::with_dimensions(width, depth, prng)
    }

    /// Builds a count-min sketch with explicit dimensions, bypassing the
    /// `(epsilon, delta)` derivation entirely. `width` must be a power of
    /// two. The probabilistic accuracy guarantee then depends solely on the
    /// caller's choice of `width`/`depth`.
    pub fn with_dimensions(width: usize, depth: usize, prng: &mut Prng) -> Result<Self, HhError> {
        validate_dimension_override(width, depth)?;
        let log2_width = width.trailing_zeros();
        let hash_params = (0..depth).map(|_| hash::ms_params(prng, log2_width)).collect();

        Ok(CountMinSketch {
            width,
            log2_width,
            depth,
            table: vec![0i64; depth * width],
            hash_params,
        })
    }

    /// Number of counters per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl FrequencySketch for CountMinSketch {
    fn update(&mut self, x: u32, weight: i64) {
        debug_assert!(weight >= 0, "count-min update requires non-negative weight");
        for row in 0..self.depth {
            let (a, b) = self.hash_params[row];
            let col = hash::ms(x, self.log2_width, a, b) as usize;
            let idx = row * self.width + col;
            self.table[idx] = self.table[idx].saturating_add(weight);
        }
    }

    fn point_query(&self, x: u32) -> i64 {
        (0..self.depth)
            .map(|row| {
                let (a, b) = self.hash_params[row];
                let col = hash::ms(x, self.log2_width, a, b) as usize;
                self.table[row * self.width + col]
            })
            .min()
            .unwrap_or(0)
    }
}
