//! Pediatric Dose Scaling

use calc_validator::{require_positive, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462;

/// Pediatric dosing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PediatricConfig {
    /// Adult body weight assumed by the adult dose (kg)
    pub reference_adult_weight_kg: f64,
    /// mg/kg above this multiple of the adult mg/kg is flagged
    pub high_ratio: f64,
    /// mg/kg below this multiple of the adult mg/kg is flagged
    pub low_ratio: f64,
}

impl Default for PediatricConfig {
    fn default() -> Self {
        Self {
            reference_adult_weight_kg: 70.0,
            high_ratio: 2.0,
            low_ratio: 0.5,
        }
    }
}

/// Body-size scaling rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DosingRule {
    /// `adult * age / (age + 12)`
    Young,
    /// `adult * weight_lb / 150`
    Clark,
    /// `adult * age_months / 150`
    Fried,
}

impl DosingRule {
    /// Scale an adult dose
    pub fn apply(&self, adult_dose: f64, age_years: f64, weight_kg: f64) -> f64 {
        match self {
            DosingRule::Young => adult_dose * age_years / (age_years + 12.0),
            DosingRule::Clark => adult_dose * (weight_kg * LB_PER_KG) / 150.0,
            DosingRule::Fried => adult_dose * (age_years * 12.0) / 150.0,
        }
    }

    /// Ages (years) the rule was derived for; `[lo, hi)`
    pub fn age_range(&self) -> (f64, f64) {
        match self {
            DosingRule::Young => (1.0, 13.0),
            DosingRule::Clark => (0.0, f64::INFINITY),
            DosingRule::Fried => (0.0, 2.0),
        }
    }
}

impl fmt::Display for DosingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DosingRule::Young => "Young's rule",
            DosingRule::Clark => "Clark's rule",
            DosingRule::Fried => "Fried's rule",
        })
    }
}

impl FromStr for DosingRule {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "young" => Ok(DosingRule::Young),
            "clark" => Ok(DosingRule::Clark),
            "fried" => Ok(DosingRule::Fried),
            _ => Err(ValidationError::UnsupportedOption {
                field: "rule",
                value: s.to_string(),
            }),
        }
    }
}

/// Child mg/kg relative to the adult mg/kg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceComparison {
    BelowReference,
    WithinReference,
    AboveReference,
}

impl ReferenceComparison {
    pub fn label(&self) -> &'static str {
        match self {
            ReferenceComparison::BelowReference => "Well below adult mg/kg, dose may be subtherapeutic",
            ReferenceComparison::WithinReference => "Comparable to adult mg/kg",
            ReferenceComparison::AboveReference => "Well above adult mg/kg, verify dose",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PediatricInput {
    pub weight_kg: f64,
    pub age_years: f64,
    pub adult_dose_mg: f64,
    pub rule: DosingRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PediatricDose {
    pub rule: DosingRule,
    pub dose_mg: f64,
    pub mg_per_kg: f64,
    /// Adult dose spread over the reference adult weight
    pub reference_mg_per_kg: f64,
    pub ratio_to_reference: f64,
    pub comparison: ReferenceComparison,
    /// Age lies in the range the rule was derived for
    pub age_in_rule_range: bool,
    pub exceeds_adult_dose: bool,
}

pub fn calculate_pediatric_dose(
    input: &PediatricInput,
    config: &PediatricConfig,
) -> Result<PediatricDose, ValidationError> {
    let weight_kg = require_positive("weight_kg", input.weight_kg)?;
    let age_years = require_positive("age_years", input.age_years)?;
    let adult_dose = require_positive("adult_dose_mg", input.adult_dose_mg)?;
    let reference_weight =
        require_positive("reference_adult_weight_kg", config.reference_adult_weight_kg)?;

    let dose_mg = input.rule.apply(adult_dose, age_years, weight_kg);
    let mg_per_kg = dose_mg / weight_kg;
    let reference_mg_per_kg = adult_dose / reference_weight;
    let ratio_to_reference = mg_per_kg / reference_mg_per_kg;

    let comparison = if ratio_to_reference > config.high_ratio {
        ReferenceComparison::AboveReference
    } else if ratio_to_reference < config.low_ratio {
        ReferenceComparison::BelowReference
    } else {
        ReferenceComparison::WithinReference
    };

    let (lo, hi) = input.rule.age_range();

    debug!(
        "{}: {:.2} mg ({:.3} mg/kg, {:.2}x adult)",
        input.rule, dose_mg, mg_per_kg, ratio_to_reference
    );

    Ok(PediatricDose {
        rule: input.rule,
        dose_mg,
        mg_per_kg,
        reference_mg_per_kg,
        ratio_to_reference,
        comparison,
        age_in_rule_range: age_years >= lo && age_years < hi,
        exceeds_adult_dose: dose_mg > adult_dose,
    })
}
