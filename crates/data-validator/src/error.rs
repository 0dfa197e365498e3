//! Validation Error Types

use thiserror::Error;

/// Errors during vitals validation
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// Value outside the plausible range for its vital
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Frame carries no timestamp
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
