//! The sketch-constant hierarchical heavy-hitter engine: a single
//! level-partitioned sketch shared across the whole dyadic tree instead of
//! `L` independent ones, amortising memory.
//!
//! Exposes the exact same `update`/`query` contract as
//! [`crate::hh::HeavyHitterEngine`] — callers (and
//! [`crate::hh::HeavyHitter`]) don't need to know which variant they hold.

use super::engine::levels_for_universe;
use crate::common::{validate_epsilon_phi, validate_universe, HhError};
use crate::frequency::ConstCountMinSketch;
use crate::prng::Prng;

/// One shared level-partitioned sketch standing in for `L` independent
/// count-min sketches.
pub struct ConstHeavyHitterEngine {
    levels: usize,
    phi: f64,
    total_weight: u64,
    sketch: ConstCountMinSketch,
}

impl ConstHeavyHitterEngine {
    /// Builds a constant-sketch engine over universe `[0, m)`.
    pub fn new(epsilon: f64, delta: f64, phi: f64, m: u64, prng: &mut Prng) -> Result<Self, HhError> {
        validate_epsilon_phi(epsilon, phi)?;
        validate_universe(m)?;

        let levels = levels_for_universe(m);
        let sketch = ConstCountMinSketch::new(epsilon, delta, levels, prng)?;

        Ok(ConstHeavyHitterEngine {
            levels,
            phi,
            total_weight: 0,
            sketch,
        })
    }

    /// Ingests a single `(uid, weight)` record. `weight` must be
    /// non-negative (count-min contract).
    pub fn update(&mut self, uid: u32, weight: i64) {
        self.total_weight = self.total_weight.saturating_add(weight.unsigned_abs() as u64);
        for level in 0..self.levels {
            let shift = self.levels - 1 - level;
            let prefix = uid >> shift;
            self.sketch.update(prefix, weight, level);
        }
    }

    /// Top-down dyadic descent identical in structure to
    /// [`crate::hh::HeavyHitterEngine::query`], querying the shared sketch's
    /// per-level layer instead of a per-level independent sketch.
    pub fn query(&self) -> Vec<u32> {
        if self.total_weight == 0 {
            return Vec::new();
        }

        let threshold = self.phi * self.total_weight as f64;
        let mut candidates: Vec<u32> = vec![0, 1];

        for level in 0..self.levels {
            let survivors: Vec<u32> = candidates
                .into_iter()
                .filter(|&p| self.sketch.point_query(p, level) as f64 >= threshold)
                .collect();

            if level == self.levels - 1 {
                return survivors;
            }

            candidates = survivors
                .into_iter()
                .flat_map(|p| [2 * p, 2 * p + 1])
                .collect();
        }

        Vec::new()
    }

    /// Total absolute weight ingested so far (`N`).
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Total number of counters across all levels of the shared sketch.
    pub fn total_counters(&self) -> usize {
        self.sketch.total_counters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s1_single_dominant_item() {
        let mut prng = Prng::new(1, 1);
        let mut engine =
            ConstHeavyHitterEngine::new(1.0 / 64.0, 0.25, 0.25, 16, &mut prng).unwrap();

        for _ in 0..10 {
            engine.update(5, 1);
        }
        for uid in [0u32, 1, 2, 3, 6, 7, 8, 9] {
            engine.update(uid, 1);
        }

        assert_eq!(engine.total_weight(), 18);
        assert_eq!(engine.query(), vec![5]);
    }

    #[test]
    fn empty_stream_has_no_hitters() {
        let mut prng = Prng::new(1, 1);
        let engine = ConstHeavyHitterEngine::new(1.0 / 64.0, 0.25, 0.05, 256, &mut prng).unwrap();
        assert!(engine.query().is_empty());
    }

    #[test]
    fn order_independence() {
        let stream: Vec<u32> = (0..2000).map(|i| (i * 37) % 64).collect();
        let mut reversed = stream.clone();
        reversed.reverse();

        let mut prng_a = Prng::new(3, 3);
        let mut engine_a = ConstHeavyHitterEngine::new(0.05, 0.2, 0.05, 64, &mut prng_a).unwrap();
        for &uid in &stream {
            engine_a.update(uid, 1);
        }

        let mut prng_b = Prng::new(3, 3);
        let mut engine_b = ConstHeavyHitterEngine::new(0.05, 0.2, 0.05, 64, &mut prng_b).unwrap();
        for &uid in &reversed {
            engine_b.update(uid, 1);
        }

        let mut a = engine_a.query();
        let mut b = engine_b.query();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }
}
