//! Error types for sketch construction, ingestion, and querying.

use std::fmt;

/// Errors that can occur while configuring sketches or ingesting a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HhError {
    /// Invalid parameter provided to a sketch or engine constructor.
    InvalidParameter {
        /// Parameter name.
        param: String,
        /// Invalid value provided.
        value: String,
        /// Constraint that was violated.
        constraint: String,
    },

    /// A record could not be parsed from the input stream.
    InputFormat {
        /// Description of what went wrong (missing fields, malformed IP,
        /// unexpected byte count, ...).
        detail: String,
    },

    /// An I/O error occurred opening, reading, or writing a file.
    Io(String),

    /// A requested allocation exceeds the resources available.
    ResourceExhausted {
        /// Description of what could not be allocated.
        detail: String,
    },
}

impl fmt::Display for HhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HhError::InvalidParameter {
                param,
                value,
                constraint,
            } => write!(
                f,
                "invalid parameter '{}': value '{}' {}",
                param, value, constraint
            ),
            HhError::InputFormat { detail } => write!(f, "input format error: {}", detail),
            HhError::Io(msg) => write!(f, "I/O error: {}", msg),
            HhError::ResourceExhausted { detail } => write!(f, "resource exhausted: {}", detail),
        }
    }
}

impl std::error::Error for HhError {}

impl From<std::io::Error> for HhError {
    fn from(err: std::io::Error) -> Self {
        HhError::Io(err.to_string())
    }
}
