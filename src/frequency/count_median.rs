//! Count-Median Sketch: signed counters, median point query.
//!
//! Unlike count-min, every row additionally carries an independent `{-1,
//! +1}` sign hash, and each update adds `sign(x) * weight` rather than
//! `weight` directly. The point query is the median across rows rather than
//! the minimum, which makes the error two-sided (`|f_hat(x) - f(x)| <=
//! epsilon*N`) and lets the sketch absorb negative weights — the only place
//! in this crate where a deletion-like update is supported.
//!
//! Depth is always rounded up to the next odd number so a row-wise median
//! is unambiguous.

use super::{next_odd, FrequencySketch, COUNT_MEDIAN_BASE};
use crate::common::{validate_dimension_override, validate_probability, HhError};
use crate::hash;
use crate::prng::Prng;

/// A count-median sketch supporting signed (positive or negative) weights.
#[derive(Clone, Debug)]
pub struct CountMedianSketch {
    width: usize,
    log2_width: u32,
    depth: usize,
    table: Vec<i64>,
    bucket_params: Vec<(u32, u32)>,
    sign_params: Vec<(u32, u32)>,
}

impl CountMedianSketch {
    /// Builds a count-median sketch sized from `(epsilon, delta)`:
    /// `w = ceil(4/epsilon)` rounded up to a power of two, `d =
    /// ceil(log_4(1/delta))` rounded up to the next odd value.
    pub fn new(epsilon: f64, delta: f64, prng: &mut Prng) -> Result<Self, HhError> {
        validate_probability(epsilon, "epsilon")?;
        validate_probability(delta, "delta")?;

        let width = ((COUNT_MEDIAN_BASE / epsilon).ceil() as usize)
            .max(1)
            .next_power_of_two();
        let depth = next_odd((((1.0 / delta).ln() / COUNT_MEDIAN_BASE.ln()).ceil() as usize).max(1));

        Self::with_dimensions(width, depth, prng)
    }

    /// Builds a count-median sketch with explicit dimensions, bypassing the
    /// `(epsilon, delta)` derivation. `width` must be a power of two and
    /// `depth` must be odd (a unique median requires it).
    pub fn with_dimensions(width: usize, depth: usize, prng: &mut Prng) -> Result<Self, HhError> {
        validate_dimension_override(width, depth)?;
        if depth % 2 == 0 {
            return Err(HhError::InvalidParameter {
                param: "depth".to_string(),
                value: depth.to_string(),
                constraint: "must be odd so a unique median exists".to_string(),
            });
        }

        let log2_width = width.trailing_zeros();
        let bucket_params = (0..depth).map(|_| hash::ms_params(prng, log2_width)).collect();
        let sign_params = (0..depth).map(|_| hash::sign_params(prng)).collect();

        Ok(CountMedianSketch {
            width,
            log2_width,
            depth,
            table: vec![0i64; depth * width],
            bucket_params,
            sign_params,
        })
    }

    /// Number of counters per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (always odd).
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl FrequencySketch for CountMedianSketch {
    fn update(&mut self, x: u32, weight: i64) {
        for row in 0..self.depth {
            let (ba, bb) = self.bucket_params[row];
            let (sa, sb) = self.sign_params[row];
            let col = hash::ms(x, self.log2_width, ba, bb) as usize;
            let s = hash::sign(x, sa, sb);
            let idx = row * self.width + col;
            self.table[idx] = self.table[idx].saturating_add(s * weight);
        }
    }

    fn point_query(&self, x: u32) -> i64 {
        let mut estimates: Vec<i64> = (0..self.depth)
            .map(|row| {
                let (ba, bb) = self.bucket_params[row];
                let (sa, sb) = self.sign_params[row];
                let col = hash::ms(x, self.log2_width, ba, bb) as usize;
                let s = hash::sign(x, sa, sb);
                s * self.table[row * self.width + col]
            })
            .collect();
        estimates.sort_unstable();
        estimates[estimates.len() / 2]
    }
}
