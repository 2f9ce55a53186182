//! Colony Forming Unit Calculator
//!
//! `CFU/mL = colonies * dilution factor / volume plated`

use calc_validator::{require_count, require_positive, BreakpointTable, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Countable plate range (inclusive)
pub const COUNTABLE_RANGE: (u32, u32) = (30, 300);

/// Volumes that may be plated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatedVolume {
    Ml0_1,
    Ml0_2,
    Ml0_5,
    Ml1_0,
}

impl PlatedVolume {
    pub const ALL: [PlatedVolume; 4] = [
        PlatedVolume::Ml0_1,
        PlatedVolume::Ml0_2,
        PlatedVolume::Ml0_5,
        PlatedVolume::Ml1_0,
    ];

    pub fn ml(&self) -> f64 {
        match self {
            PlatedVolume::Ml0_1 => 0.1,
            PlatedVolume::Ml0_2 => 0.2,
            PlatedVolume::Ml0_5 => 0.5,
            PlatedVolume::Ml1_0 => 1.0,
        }
    }

    /// Match a volume in mL against the allowed set
    pub fn from_ml(volume_ml: f64) -> Result<Self, ValidationError> {
        let volume_ml = require_positive("volume_ml", volume_ml)?;
        Self::ALL
            .into_iter()
            .find(|v| (v.ml() - volume_ml).abs() < 1e-9)
            .ok_or_else(|| ValidationError::UnsupportedOption {
                field: "volume_ml",
                value: volume_ml.to_string(),
            })
    }
}

/// Whether the plate count is statistically usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountValidity {
    /// Fewer than 30 colonies
    TooFew,
    Valid,
    /// More than 300 colonies
    TooMany,
}

impl CountValidity {
    pub fn from_colonies(colonies: u32) -> Self {
        if colonies < COUNTABLE_RANGE.0 {
            CountValidity::TooFew
        } else if colonies > COUNTABLE_RANGE.1 {
            CountValidity::TooMany
        } else {
            CountValidity::Valid
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountValidity::TooFew => "Too few colonies, increase plated volume",
            CountValidity::Valid => "Valid count",
            CountValidity::TooMany => "Too many colonies, increase dilution",
        }
    }
}

/// Microbial load bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrationLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConcentrationLevel {
    pub const TABLE: BreakpointTable<ConcentrationLevel> = BreakpointTable::new(
        &[100.0, 1_000.0, 10_000.0, 100_000.0],
        &[
            ConcentrationLevel::VeryLow,
            ConcentrationLevel::Low,
            ConcentrationLevel::Moderate,
            ConcentrationLevel::High,
            ConcentrationLevel::VeryHigh,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            ConcentrationLevel::VeryLow => "Very low concentration",
            ConcentrationLevel::Low => "Low concentration",
            ConcentrationLevel::Moderate => "Moderate concentration",
            ConcentrationLevel::High => "High concentration",
            ConcentrationLevel::VeryHigh => "Very high concentration",
        }
    }
}

impl fmt::Display for ConcentrationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plate count inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CfuInput {
    pub dilution_factor: f64,
    /// Colonies counted; a non-negative whole number
    pub colonies: f64,
    /// Volume plated (mL): 0.1, 0.2, 0.5 or 1.0
    pub volume_ml: f64,
}

/// Plate count result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CfuResult {
    pub cfu_per_ml: f64,
    /// log10(CFU/mL), absent for a zero count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log10_cfu_per_ml: Option<f64>,
    pub validity: CountValidity,
    pub concentration: ConcentrationLevel,
}

/// Compute CFU/mL from a plate count
pub fn calculate_cfu(input: &CfuInput) -> Result<CfuResult, ValidationError> {
    let dilution_factor = require_positive("dilution_factor", input.dilution_factor)?;
    let colonies = require_count("colonies", input.colonies)?;
    let volume = PlatedVolume::from_ml(input.volume_ml)?;

    let cfu_per_ml = colonies as f64 * dilution_factor / volume.ml();
    let log10_cfu_per_ml = (cfu_per_ml > 0.0).then(|| cfu_per_ml.log10());

    debug!("CFU: {} colonies -> {:.1} CFU/mL", colonies, cfu_per_ml);

    Ok(CfuResult {
        cfu_per_ml,
        log10_cfu_per_ml,
        validity: CountValidity::from_colonies(colonies),
        concentration: ConcentrationLevel::TABLE.classify(cfu_per_ml),
    })
}
