//! Level-partitioned count-min sketch.
//!
//! Replaces the `L` independent per-level sketches inside the hierarchical
//! heavy-hitter engine with a single contiguous allocation whose rows are
//! carved into `L` layers — one per tree level — so the total counter count
//! stays constant as `L` grows instead of scaling linearly with it.
//! Shallower levels (coarser prefixes closer to the root) get a
//! proportionally larger per-level error budget and thus a narrower row,
//! per the `w_l = ceil(b / (epsilon * 2^(L-1-l)))` formula.
//!
//! Each layer keeps its own independently-sampled hash parameters; only the
//! depth `d` (number of rows) is shared across layers.

use super::{COUNT_MIN_DEPTH_BASE, COUNT_MIN_WIDTH_BASE};
use crate::common::{validate_probability, HhError};
use crate::hash;
use crate::prng::Prng;

/// A single contiguous count-min sketch whose rows are partitioned by tree
/// level, used by [`crate::hh::ConstHeavyHitterEngine`].
#[derive(Clone, Debug)]
pub struct ConstCountMinSketch {
    levels: usize,
    depth: usize,
    layer_widths: Vec<usize>,
    layer_log2_widths: Vec<u32>,
    layer_offsets: Vec<usize>,
    table: Vec<i64>,
    layer_hash_params: Vec<Vec<(u32, u32)>>,
}

impl ConstCountMinSketch {
    /// Builds a level-partitioned sketch for a tree of `levels` levels,
    /// sized from `(epsilon, delta)` shared across all levels.
    pub fn new(epsilon: f64, delta: f64, levels: usize, prng: &mut Prng) -> Result<Self, HhError> {
        validate_probability(epsilon, "epsilon")?;
        validate_probability(delta, "delta")?;
        if levels == 0 || levels > 32 {
            return Err(HhError::InvalidParameter {
                param: "levels".to_string(),
                value: levels.to_string(),
                constraint: "must be in range [1, 32]".to_string(),
            });
        }

        let depth = (((1.0 / delta).ln() / COUNT_MIN_DEPTH_BASE.ln()).ceil() as usize).max(1);

        let mut layer_widths = Vec::with_capacity(levels);
        let mut layer_log2_widths = Vec::with_capacity(levels);
        let mut layer_offsets = Vec::with_capacity(levels);
        let mut layer_hash_params = Vec::with_capacity(levels);
        let mut table = Vec::new();

        for level in 0..levels {
            let scale = 2f64.powi((levels - 1 - level) as i32);
            let width = ((COUNT_MIN_WIDTH_BASE / (epsilon * scale)).ceil() as usize)
                .max(1)
                .next_power_of_two();
            let log2_width = width.trailing_zeros();

            layer_offsets.push(table.len());
            table.extend(std::iter::repeat(0i64).take(depth * width));

            let params = (0..depth).map(|_| hash::ms_params(prng, log2_width)).collect();

            layer_widths.push(width);
            layer_log2_widths.push(log2_width);
            layer_hash_params.push(params);
        }

        Ok(ConstCountMinSketch {
            levels,
            depth,
            layer_widths,
            layer_log2_widths,
            layer_offsets,
            table,
            layer_hash_params,
        })
    }

    /// Adds `weight` to the counters for prefix `uid`'s projection onto
    /// `level`'s layer. `weight` must be non-negative (count-min contract).
    pub fn update(&mut self, uid: u32, weight: i64, level: usize) {
        debug_assert!(level < self.levels, "level out of range");
        debug_assert!(weight >= 0, "count-min update requires non-negative weight");

        let width = self.layer_widths[level];
        let log2_width = self.layer_log2_widths[level];
        let offset = self.layer_offsets[level];

        for row in 0..self.depth {
            let (a, b) = self.layer_hash_params[level][row];
            let col = hash::ms(uid, log2_width, a, b) as usize;
            let idx = offset + row * width + col;
            self.table[idx] = self.table[idx].saturating_add(weight);
        }
    }

    /// Returns the minimum counter value across `level`'s rows for `prefix`.
    pub fn point_query(&self, prefix: u32, level: usize) -> i64 {
        debug_assert!(level < self.levels, "level out of range");

        let width = self.layer_widths[level];
        let log2_width = self.layer_log2_widths[level];
        let offset = self.layer_offsets[level];

        (0..self.depth)
            .map(|row| {
                let (a, b) = self.layer_hash_params[level][row];
                let col = hash::ms(prefix, log2_width, a, b) as usize;
                self.table[offset + row * width + col]
            })
            .min()
            .unwrap_or(0)
    }

    /// Total number of counters across all layers.
    pub fn total_counters(&self) -> usize {
        self.table.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_contiguous_allocation_across_levels() {
        let mut prng = Prng::new(1, 1);
        let sketch = ConstCountMinSketch::new(0.1, 0.2, 4, &mut prng).unwrap();
        assert_eq!(sketch.total_counters(), sketch.table.len());
        assert!(sketch.total_counters() > 0);
    }

    #[test]
    fn never_underestimates_within_a_level() {
        let mut prng = Prng::new(5, 6);
        let mut sketch = ConstCountMinSketch::new(0.05, 0.1, 3, &mut prng).unwrap();
        for _ in 0..50 {
            sketch.update(7, 1, 2);
        }
        assert!(sketch.point_query(7, 2) >= 50);
    }

    #[test]
    fn levels_are_independently_addressable() {
        let mut prng = Prng::new(2, 3);
        let mut sketch = ConstCountMinSketch::new(0.1, 0.2, 3, &mut prng).unwrap();
        sketch.update(1, 10, 0);
        assert_eq!(sketch.point_query(1, 1), 0);
    }
}
