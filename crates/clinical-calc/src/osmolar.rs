//! Serum Osmolar Gap
//!
//! `calculated = 2*Na + glucose/18 + BUN/2.8 [+ ethanol/4.6]` (mg/dL inputs),
//! `gap = measured - calculated`.

use calc_validator::{require_non_negative, require_positive, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// mg/dL per mmol/L of glucose
pub const GLUCOSE_MG_PER_MMOL: f64 = 18.0;
/// mg/dL per mmol/L of urea nitrogen
pub const BUN_MG_PER_MMOL: f64 = 2.8;
/// Ethanol divisor (mg/dL to mOsm/kg)
pub const ETHANOL_DIVISOR: f64 = 4.6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseUnit {
    #[default]
    MgPerDl,
    MmolPerL,
}

impl GlucoseUnit {
    fn to_mg_per_dl(self, value: f64) -> f64 {
        match self {
            GlucoseUnit::MgPerDl => value,
            GlucoseUnit::MmolPerL => value * GLUCOSE_MG_PER_MMOL,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BunUnit {
    #[default]
    MgPerDl,
    MmolPerL,
}

impl BunUnit {
    fn to_mg_per_dl(self, value: f64) -> f64 {
        match self {
            BunUnit::MgPerDl => value,
            BunUnit::MmolPerL => value * BUN_MG_PER_MMOL,
        }
    }
}

/// Interpretation of the gap (mOsm/kg)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OsmolarGapClass {
    /// Below -10
    Low,
    Normal,
    /// Above 10
    Elevated,
}

impl OsmolarGapClass {
    /// Gap of exactly ±10 is normal
    pub fn from_gap(gap: f64) -> Self {
        if gap > 10.0 {
            OsmolarGapClass::Elevated
        } else if gap < -10.0 {
            OsmolarGapClass::Low
        } else {
            OsmolarGapClass::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OsmolarGapClass::Low => "Low osmolar gap, check measured value",
            OsmolarGapClass::Normal => "Normal osmolar gap",
            OsmolarGapClass::Elevated => "Elevated osmolar gap, possible toxic ingestion",
        }
    }
}

impl fmt::Display for OsmolarGapClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serum chemistry inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OsmolarGapInput {
    /// mEq/L
    pub sodium: f64,
    pub glucose: f64,
    #[serde(default)]
    pub glucose_unit: GlucoseUnit,
    pub bun: f64,
    #[serde(default)]
    pub bun_unit: BunUnit,
    /// mg/dL
    #[serde(default)]
    pub ethanol: Option<f64>,
    /// mOsm/kg
    #[serde(default)]
    pub measured_osmolality: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OsmolarGapResult {
    pub calculated_osmolality: f64,
    /// Present only when a measured osmolality was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<OsmolarGapClass>,
}

pub fn calculate_osmolar_gap(input: &OsmolarGapInput) -> Result<OsmolarGapResult, ValidationError> {
    let sodium = require_positive("sodium", input.sodium)?;
    let glucose = input
        .glucose_unit
        .to_mg_per_dl(require_non_negative("glucose", input.glucose)?);
    let bun = input.bun_unit.to_mg_per_dl(require_non_negative("bun", input.bun)?);
    let ethanol = input
        .ethanol
        .map(|e| require_non_negative("ethanol", e))
        .transpose()?;
    let measured = input
        .measured_osmolality
        .map(|m| require_positive("measured_osmolality", m))
        .transpose()?;

    let mut calculated_osmolality =
        2.0 * sodium + glucose / GLUCOSE_MG_PER_MMOL + bun / BUN_MG_PER_MMOL;
    if let Some(ethanol) = ethanol {
        calculated_osmolality += ethanol / ETHANOL_DIVISOR;
    }

    let gap = measured.map(|m| m - calculated_osmolality);
    let class = gap.map(OsmolarGapClass::from_gap);

    debug!(
        "Osmolality: calculated={:.2}, gap={:?}",
        calculated_osmolality, gap
    );

    Ok(OsmolarGapResult {
        calculated_osmolality,
        gap,
        class,
    })
}
