//! Range Checking for Calculator Inputs
//!
//! Each helper returns the value it checked so call sites can bind and
//! validate in one step: `let weight = require_positive("weight_kg", input.weight_kg)?;`

use crate::error::ValidationError;

/// Reject NaN and infinities
pub fn require_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotFinite { field })
    }
}

/// Require a finite value strictly greater than zero
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

/// Require a finite value of zero or more
pub fn require_non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::Negative { field, value })
    }
}

/// Require a non-negative whole number that fits a `u32` count
pub fn require_count(field: &'static str, value: f64) -> Result<u32, ValidationError> {
    let value = require_non_negative(field, value)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotWholeNumber { field, value });
    }
    if value > u32::MAX as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: u32::MAX as f64,
        });
    }
    Ok(value as u32)
}

/// Require a finite value inside the inclusive range `[min, max]`
pub fn require_range(
    field: &'static str,
    value: f64,
    range: (f64, f64),
) -> Result<f64, ValidationError> {
    let value = require_finite(field, value)?;
    if value < range.0 || value > range.1 {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min: range.0,
            max: range.1,
        })
    } else {
        Ok(value)
    }
}

/// Require `lesser <= greater`
pub fn require_not_exceeding(
    lesser: (&'static str, f64),
    greater: (&'static str, f64),
) -> Result<(), ValidationError> {
    if lesser.1 <= greater.1 {
        Ok(())
    } else {
        Err(ValidationError::OrderViolation {
            lesser: lesser.0,
            lesser_value: lesser.1,
            greater: greater.0,
            greater_value: greater.1,
        })
    }
}
