//! The hierarchical heavy-hitter engine: a dyadic tree over `[0, m)` that
//! turns a point-frequency oracle into a threshold query.
//!
//! Two variants share one external contract: independent per-level
//! sketches ([`HeavyHitterEngine`]) and a single level-partitioned
//! sketch ([`ConstHeavyHitterEngine`]). [`HeavyHitter`] wraps both behind a
//! single `update`/`query` surface so the CLI driver can hold whichever
//! variant the user selected without matching on it at every call site.

mod const_engine;
mod engine;

pub use const_engine::ConstHeavyHitterEngine;
pub use engine::{Dims, HeavyHitterEngine, SketchKind};

use crate::common::HhError;
use crate::prng::Prng;

/// Either hierarchical heavy-hitter engine variant, behind one interface.
pub enum HeavyHitter {
    /// `L` independent per-level sketches.
    Independent(HeavyHitterEngine),
    /// One shared level-partitioned sketch.
    Constant(ConstHeavyHitterEngine),
}

impl HeavyHitter {
    /// Builds the independent-sketches variant with the given sketch kind.
    pub fn independent(
        epsilon: f64,
        delta: f64,
        phi: f64,
        m: u64,
        kind: SketchKind,
        prng: &mut Prng,
    ) -> Result<Self, HhError> {
        HeavyHitterEngine::new(epsilon, delta, phi, m, kind, prng).map(HeavyHitter::Independent)
    }

    /// Builds the independent-sketches variant with explicit per-level
    /// dimensions.
    pub fn independent_with_dimensions(
        width: usize,
        depth: usize,
        phi: f64,
        m: u64,
        kind: SketchKind,
        prng: &mut Prng,
    ) -> Result<Self, HhError> {
        HeavyHitterEngine::with_dimensions(width, depth, phi, m, kind, prng)
            .map(HeavyHitter::Independent)
    }

    /// Builds the constant-sketch variant.
    pub fn constant(epsilon: f64, delta: f64, phi: f64, m: u64, prng: &mut Prng) -> Result<Self, HhError> {
        ConstHeavyHitterEngine::new(epsilon, delta, phi, m, prng).map(HeavyHitter::Constant)
    }

    /// Ingests a single `(uid, weight)` record.
    pub fn update(&mut self, uid: u32, weight: i64) {
        match self {
            HeavyHitter::Independent(engine) => engine.update(uid, weight),
            HeavyHitter::Constant(engine) => engine.update(uid, weight),
        }
    }

    /// Returns the candidate heavy hitters.
    pub fn query(&self) -> Vec<u32> {
        match self {
            HeavyHitter::Independent(engine) => engine.query(),
            HeavyHitter::Constant(engine) => engine.query(),
        }
    }

    /// Total absolute weight ingested so far (`N`).
    pub fn total_weight(&self) -> u64 {
        match self {
            HeavyHitter::Independent(engine) => engine.total_weight(),
            HeavyHitter::Constant(engine) => engine.total_weight(),
        }
    }
}
