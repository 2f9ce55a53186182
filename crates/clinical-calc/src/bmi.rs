//! Body Mass Index

use calc_validator::{require_positive, BreakpointTable, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// BMI bounds of the normal-weight band, used for the ideal weight range
pub const NORMAL_BMI_RANGE: (f64, f64) = (18.5, 24.9);

/// WHO weight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    SevereThinness,
    ModerateThinness,
    MildThinness,
    NormalWeight,
    Overweight,
    ObeseClassI,
    ObeseClassII,
    ObeseClassIII,
}

impl BmiCategory {
    pub const TABLE: BreakpointTable<BmiCategory> = BreakpointTable::new(
        &[16.0, 17.0, 18.5, 25.0, 30.0, 35.0, 40.0],
        &[
            BmiCategory::SevereThinness,
            BmiCategory::ModerateThinness,
            BmiCategory::MildThinness,
            BmiCategory::NormalWeight,
            BmiCategory::Overweight,
            BmiCategory::ObeseClassI,
            BmiCategory::ObeseClassII,
            BmiCategory::ObeseClassIII,
        ],
    );

    pub fn from_bmi(bmi: f64) -> Self {
        Self::TABLE.classify(bmi)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::SevereThinness => "Severe Thinness",
            BmiCategory::ModerateThinness => "Moderate Thinness",
            BmiCategory::MildThinness => "Mild Thinness",
            BmiCategory::NormalWeight => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClassI => "Obese Class I",
            BmiCategory::ObeseClassII => "Obese Class II",
            BmiCategory::ObeseClassIII => "Obese Class III",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// kg/m²
    pub bmi: f64,
    pub category: BmiCategory,
    /// Weight range (kg) for a normal BMI at this height
    pub ideal_weight_kg: (f64, f64),
}

pub fn calculate_bmi(input: &BmiInput) -> Result<BmiResult, ValidationError> {
    let height_cm = require_positive("height_cm", input.height_cm)?;
    let weight_kg = require_positive("weight_kg", input.weight_kg)?;

    let height_m = height_cm / 100.0;
    let height_sq = height_m * height_m;
    let bmi = weight_kg / height_sq;
    let category = BmiCategory::from_bmi(bmi);

    debug!("BMI {:.1} ({})", bmi, category);

    Ok(BmiResult {
        bmi,
        category,
        ideal_weight_kg: (NORMAL_BMI_RANGE.0 * height_sq, NORMAL_BMI_RANGE.1 * height_sq),
    })
}
