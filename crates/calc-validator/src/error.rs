//! Validation Error Types

use thiserror::Error;

/// Reason a calculator refused to compute a result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Value is NaN or infinite
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// Value must be strictly greater than zero
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// Value must be zero or greater
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// Count given with a fractional part
    #[error("{field} must be a whole number, got {value}")]
    NotWholeNumber { field: &'static str, value: f64 },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Two values violate a required ordering
    #[error("{lesser} ({lesser_value}) must not exceed {greater} ({greater_value})")]
    OrderViolation {
        lesser: &'static str,
        lesser_value: f64,
        greater: &'static str,
        greater_value: f64,
    },

    /// Too few samples for a statistical test
    #[error("At least {required} values are required, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    /// Selection outside a closed set (unit, rule, method, ...)
    #[error("Unsupported {field}: {value}")]
    UnsupportedOption { field: &'static str, value: String },

    /// Opioid given by a route it is not available for
    #[error("{opioid} is not available by the {route} route")]
    UnsupportedRoute { opioid: String, route: String },
}

impl ValidationError {
    /// Human-readable reason for display by the host
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Name of the input the error refers to, when there is a single one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotFinite { field }
            | ValidationError::NotPositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotWholeNumber { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::UnsupportedOption { field, .. } => Some(field),
            ValidationError::OrderViolation { lesser, .. } => Some(lesser),
            ValidationError::InsufficientSamples { .. }
            | ValidationError::UnsupportedRoute { .. } => None,
        }
    }
}
