//! Error types and parameter validation shared across the crate.

mod error;
mod validation;

pub use error::HhError;
pub use validation::{
    validate_dimension_override, validate_epsilon_phi, validate_probability, validate_universe,
};

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HhError>;
