//! Temperature Units

use calc_validator::{require_finite, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Absolute zero in degrees Celsius
pub const ABSOLUTE_ZERO_C: f64 = -273.15;

/// Supported temperature scales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Kelvin,
}

impl TemperatureUnit {
    /// Normalize a reading to degrees Celsius
    pub fn to_celsius(&self, field: &'static str, value: f64) -> Result<f64, ValidationError> {
        let value = require_finite(field, value)?;
        let celsius = match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Kelvin => value + ABSOLUTE_ZERO_C,
        };
        if celsius < ABSOLUTE_ZERO_C {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min: self.absolute_zero(),
                max: f64::INFINITY,
            });
        }
        Ok(celsius)
    }

    fn absolute_zero(&self) -> f64 {
        match self {
            TemperatureUnit::Celsius => ABSOLUTE_ZERO_C,
            TemperatureUnit::Kelvin => 0.0,
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "°c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
            _ => Err(ValidationError::UnsupportedOption {
                field: "temperature_unit",
                value: s.to_string(),
            }),
        }
    }
}
