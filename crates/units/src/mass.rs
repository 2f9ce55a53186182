//! Mass Units
//!
//! Every unit converts through milligrams.

use calc_validator::{require_finite, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Supported mass units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassUnit {
    /// Milligram (base unit)
    Mg,
    /// Microgram
    Mcg,
    /// Gram
    G,
    /// Kilogram
    Kg,
    /// Avoirdupois pound
    Lb,
    /// Avoirdupois ounce
    Oz,
}

impl MassUnit {
    /// All units, in display order
    pub const ALL: [MassUnit; 6] = [
        MassUnit::Mg,
        MassUnit::Mcg,
        MassUnit::G,
        MassUnit::Kg,
        MassUnit::Lb,
        MassUnit::Oz,
    ];

    /// Milligrams per one of this unit
    pub fn mg_factor(&self) -> f64 {
        match self {
            MassUnit::Mg => 1.0,
            MassUnit::Mcg => 0.001,
            MassUnit::G => 1_000.0,
            MassUnit::Kg => 1_000_000.0,
            MassUnit::Lb => 453_592.37,
            MassUnit::Oz => 28_349.523125,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            MassUnit::Mg => "mg",
            MassUnit::Mcg => "mcg",
            MassUnit::G => "g",
            MassUnit::Kg => "kg",
            MassUnit::Lb => "lb",
            MassUnit::Oz => "oz",
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for MassUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mg" => Ok(MassUnit::Mg),
            "mcg" | "ug" | "µg" => Ok(MassUnit::Mcg),
            "g" => Ok(MassUnit::G),
            "kg" => Ok(MassUnit::Kg),
            "lb" | "lbs" => Ok(MassUnit::Lb),
            "oz" => Ok(MassUnit::Oz),
            _ => Err(ValidationError::UnsupportedOption {
                field: "mass_unit",
                value: s.to_string(),
            }),
        }
    }
}

/// Convert a mass between units
pub fn convert(value: f64, from: MassUnit, to: MassUnit) -> Result<f64, ValidationError> {
    let value = require_finite("value", value)?;
    require_finite("converted", value * from.mg_factor() / to.mg_factor())
}

/// Mass conversion request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassConversionInput {
    pub value: f64,
    pub from: MassUnit,
    pub to: MassUnit,
}

/// Mass conversion result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassConversion {
    pub value: f64,
    pub from: MassUnit,
    pub to: MassUnit,
    /// `value` expressed in `to`
    pub converted: f64,
}

/// Convert a mass request into a result record
pub fn convert_mass(input: &MassConversionInput) -> Result<MassConversion, ValidationError> {
    let converted = convert(input.value, input.from, input.to)?;
    debug!("{} {} = {} {}", input.value, input.from, converted, input.to);
    Ok(MassConversion {
        value: input.value,
        from: input.from,
        to: input.to,
        converted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gram_to_milligram() {
        assert_eq!(convert(2.5, MassUnit::G, MassUnit::Mg).unwrap(), 2_500.0);
    }

    #[test]
    fn test_pound_to_kilogram() {
        let kg = convert(1.0, MassUnit::Lb, MassUnit::Kg).unwrap();
        assert!((kg - 0.45359237).abs() < 1e-12);
    }

    #[test]
    fn test_ounces_per_pound() {
        let oz = convert(1.0, MassUnit::Lb, MassUnit::Oz).unwrap();
        assert!((oz - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(convert(f64::NAN, MassUnit::G, MassUnit::Mg).is_err());
        assert!(convert(f64::INFINITY, MassUnit::G, MassUnit::Mg).is_err());
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(matches!(
            convert(1e308, MassUnit::Kg, MassUnit::Mcg),
            Err(ValidationError::NotFinite { field: "converted" })
        ));
        assert!(convert(1e308, MassUnit::Mcg, MassUnit::Kg).is_ok());
    }

    #[test]
    fn test_parse_symbols() {
        assert_eq!("MCG".parse::<MassUnit>().unwrap(), MassUnit::Mcg);
        assert_eq!("µg".parse::<MassUnit>().unwrap(), MassUnit::Mcg);
        assert_eq!(" lbs ".parse::<MassUnit>().unwrap(), MassUnit::Lb);
        assert!("grain".parse::<MassUnit>().is_err());
    }

    #[test]
    fn test_convert_mass_record() {
        let result = convert_mass(&MassConversionInput {
            value: 500.0,
            from: MassUnit::Mcg,
            to: MassUnit::Mg,
        })
        .unwrap();
        assert!((result.converted - 0.5).abs() < 1e-12);
    }

    fn any_unit() -> impl Strategy<Value = MassUnit> {
        prop::sample::select(MassUnit::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn round_trip_recovers_value(x in 1e-6f64..1e9, u in any_unit(), v in any_unit()) {
            let there = convert(x, u, v).unwrap();
            let back = convert(there, v, u).unwrap();
            prop_assert!((back - x).abs() <= x * 1e-12);
        }
    }
}
