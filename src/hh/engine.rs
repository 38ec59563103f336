//! The independent-per-level hierarchical heavy-hitter engine: one
//! independent frequency sketch per dyadic-tree level.

use crate::common::{validate_epsilon_phi, validate_probability, validate_universe, HhError};
use crate::frequency::{CountMedianSketch, CountMinSketch, FrequencySketch};
use crate::prng::Prng;

/// Which frequency sketch backs each level of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SketchKind {
    /// One-sided error, non-negative weights only.
    CountMin,
    /// Two-sided error, supports negative (deletion-like) weights.
    CountMedian,
}

/// How a level's sketch is dimensioned.
#[derive(Clone, Copy, Debug)]
pub enum Dims {
    /// Derive `(width, depth)` from `(epsilon, delta)`.
    Derived { epsilon: f64, delta: f64 },
    /// Bypass the `(epsilon, delta)` derivation; the accuracy guarantee
    /// then depends solely on the caller's chosen dimensions.
    Explicit { width: usize, depth: usize },
}

/// `L` independent frequency sketches, one per dyadic-tree level, fed by a
/// shared running total of absolute ingested weight.
pub struct HeavyHitterEngine {
    levels: usize,
    phi: f64,
    total_weight: u64,
    sketches: Vec<Box<dyn FrequencySketch>>,
}

impl HeavyHitterEngine {
    /// Builds an engine over universe `[0, m)`, splitting the error budget
    /// `epsilon` uniformly across `L = ceil(log2(m))` levels so the final
    /// additive error stays bounded by `epsilon * N`.
    pub fn new(
        epsilon: f64,
        delta: f64,
        phi: f64,
        m: u64,
        kind: SketchKind,
        prng: &mut Prng,
    ) -> Result<Self, HhError> {
        validate_epsilon_phi(epsilon, phi)?;
        validate_universe(m)?;

        let levels = levels_for_universe(m);
        let eps_per_level = epsilon / levels as f64;
        let dims = Dims::Derived {
            epsilon: eps_per_level,
            delta,
        };
        Self::build(levels, phi, kind, dims, prng)
    }

    /// Builds an engine with explicit per-level sketch dimensions,
    /// bypassing the `(epsilon, delta)` derivation.
    pub fn with_dimensions(
        width: usize,
        depth: usize,
        phi: f64,
        m: u64,
        kind: SketchKind,
        prng: &mut Prng,
    ) -> Result<Self, HhError> {
        validate_universe(m)?;
        validate_probability(phi, "phi")?;

        let levels = levels_for_universe(m);
        let dims = Dims::Explicit { width, depth };
        Self::build(levels, phi, kind, dims, prng)
    }

    fn build(
        levels: usize,
        phi: f64,
        kind: SketchKind,
        dims: Dims,
        prng: &mut Prng,
    ) -> Result<Self, HhError> {
        let mut sketches: Vec<Box<dyn FrequencySketch>> = Vec::with_capacity(levels);
        for _ in 0..levels {
            let sketch: Box<dyn FrequencySketch> = match (kind, dims) {
                (SketchKind::CountMin, Dims::Derived { epsilon, delta }) => {
                    Box::new(CountMinSketch::new(epsilon, delta, prng)?)
                }
                (SketchKind::CountMin, Dims::Explicit { width, depth }) => {
                    Box::new(CountMinSketch::with_dimensions(width, depth, prng)?)
                }
                (SketchKind::CountMedian, Dims::Derived { epsilon, delta }) => {
                    Box::new(CountMedianSketch::new(epsilon, delta, prng)?)
                }
                (SketchKind::CountMedian, Dims::Explicit { width, depth }) => {
                    Box::new(CountMedianSketch::with_dimensions(width, depth, prng)?)
                }
            };
            sketches.push(sketch);
        }

        Ok(HeavyHitterEngine {
            levels,
            phi,
            total_weight: 0,
            sketches,
        })
    }

    /// Ingests a single `(uid, weight)` record. Touches one counter per
    /// level, `O(L * d)` total.
    pub fn update(&mut self, uid: u32, weight: i64) {
        self.total_weight = self.total_weight.saturating_add(weight.unsigned_abs() as u64);
        for (level, sketch) in self.sketches.iter_mut().enumerate() {
            let shift = self.levels - 1 - level;
            let prefix = uid >> shift;
            sketch.update(prefix, weight);
        }
    }

    /// Top-down dyadic descent: returns the candidate heavy hitters whose
    /// estimated frequency is `>= phi * N`.
    pub fn query(&self) -> Vec<u32> {
        if self.total_weight == 0 {
            return Vec::new();
        }

        let threshold = self.phi * self.total_weight as f64;
        let mut candidates: Vec<u32> = vec![0, 1];

        for (level, sketch) in self.sketches.iter().enumerate() {
            let survivors: Vec<u32> = candidates
                .into_iter()
                .filter(|&p| sketch.point_query(p) as f64 >= threshold)
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

    /// Number of dyadic-tree levels.
    pub fn levels(&self) -> usize {
        self.levels
    }
}

/// `L = ceil(log2(m))`, floored at 1 (a universe of size 1 still needs a
/// single leaf level).
pub(crate) fn levels_for_universe(m: u64) -> usize {
    if m <= 1 {
        1
    } else {
        (64 - (m - 1).leading_zeros()) as usize
    }
}
