//! Parameter bounds checking for sketch and engine constructors.

use super::error::HhError;

/// Largest representable universe size: `m` must lie in `[1, 2^32]`.
pub const MAX_UNIVERSE: u64 = 1u64 << 32;

/// Upper bound on an explicit `--width`/`--height` override, to keep a
/// mistyped CLI flag from triggering a multi-gigabyte allocation.
pub const MAX_DIMENSION: usize = 1 << 24;

/// Validates that a value is a probability in `(0.0, 1.0)`.
pub fn validate_probability(value: f64, param_name: &str) -> Result<(), HhError> {
    if !(value > 0.0 && value < 1.0) {
        return Err(HhError::InvalidParameter {
            param: param_name.to_string(),
            value: value.to_string(),
            constraint: "must be in range (0.0, 1.0) (exclusive)".to_string(),
        });
    }
    Ok(())
}

/// Validates the core accuracy invariant `epsilon < phi`.
pub fn validate_epsilon_phi(epsilon: f64, phi: f64) -> Result<(), HhError> {
    validate_probability(epsilon, "epsilon")?;
    validate_probability(phi, "phi")?;
    if epsilon >= phi {
        return Err(HhError::InvalidParameter {
            param: "epsilon".to_string(),
            value: epsilon.to_string(),
            constraint: format!("must be strictly less than phi ({})", phi),
        });
    }
    Ok(())
}

/// Validates that the universe size `m` lies in `[1, 2^32]`.
pub fn validate_universe(m: u64) -> Result<(), HhError> {
    if m == 0 || m > MAX_UNIVERSE {
        return Err(HhError::InvalidParameter {
            param: "universe".to_string(),
            value: m.to_string(),
            constraint: format!("must be in range [1, {}]", MAX_UNIVERSE),
        });
    }
    Ok(())
}

/// Validates an explicit `--width`/`--height` dimension override.
pub fn validate_dimension_override(width: usize, depth: usize) -> Result<(), HhError> {
    if width == 0 || !width.is_power_of_two() {
        return Err(HhError::InvalidParameter {
            param: "width".to_string(),
            value: width.to_string(),
            constraint: "must be a nonzero power of two".to_string(),
        });
    }
    if depth == 0 {
        return Err(HhError::InvalidParameter {
            param: "depth".to_string(),
            value: depth.to_string(),
            constraint: "must be greater than 0".to_string(),
        });
    }
    if width > MAX_DIMENSION || depth > MAX_DIMENSION {
        return Err(HhError::ResourceExhausted {
            detail: format!(
                "requested sketch dimensions {}x{} exceed the {} cap",
                width, depth, MAX_DIMENSION
            ),
        });
    }
    Ok(())
}
