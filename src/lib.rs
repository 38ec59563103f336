//! precision_hh: hierarchical heavy-hitter detection over integer streams.
//!
//! Identifies items whose frequency exceeds a fraction `phi` of the total
//! stream weight by descending a dyadic prefix tree over the item universe,
//! pruning subtrees whose sketch-estimated frequency falls below threshold
//! at each level.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod common;
pub mod frequency;
pub mod hash;
pub mod hh;
pub mod prng;
pub mod stream;

pub use common::{HhError, Result};
pub use frequency::{CountMedianSketch, CountMinSketch, FrequencySketch};
pub use hh::{ConstHeavyHitterEngine, Dims, HeavyHitter, HeavyHitterEngine, SketchKind};
pub use prng::Prng;
