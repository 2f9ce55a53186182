//! Volume of Distribution
//!
//! `Vd = dose / C0`, normalized per kg of body weight.

use calc_validator::{require_positive, BreakpointTable, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Volume of distribution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Body weight used when none is given (kg)
    pub default_weight_kg: f64,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            default_weight_kg: 70.0,
        }
    }
}

/// Body compartment implied by Vd (L/kg)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionType {
    Plasma,
    ExtracellularFluid,
    TotalBodyWater,
    ModerateTissue,
    ExtensiveTissue,
    TissueSequestration,
}

impl DistributionType {
    pub const TABLE: BreakpointTable<DistributionType> = BreakpointTable::new(
        &[0.1, 0.3, 0.7, 2.0, 10.0],
        &[
            DistributionType::Plasma,
            DistributionType::ExtracellularFluid,
            DistributionType::TotalBodyWater,
            DistributionType::ModerateTissue,
            DistributionType::ExtensiveTissue,
            DistributionType::TissueSequestration,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            DistributionType::Plasma => "Largely confined to plasma",
            DistributionType::ExtracellularFluid => "Distributes into extracellular fluid",
            DistributionType::TotalBodyWater => "Distributes into total body water",
            DistributionType::ModerateTissue => "Moderate tissue distribution",
            DistributionType::ExtensiveTissue => "Extensive tissue distribution",
            DistributionType::TissueSequestration => "Very extensive tissue binding or sequestration",
        }
    }
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionInput {
    pub dose_mg: f64,
    /// Initial plasma concentration (mg/L)
    pub initial_concentration: f64,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Plasma concentration to reach with a loading dose (mg/L)
    #[serde(default)]
    pub target_concentration: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub vd_l: f64,
    pub vd_l_per_kg: f64,
    /// Weight actually used (kg)
    pub weight_kg: f64,
    pub distribution: DistributionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_dose_mg: Option<f64>,
}

impl DistributionResult {
    /// Dose (mg) needed to reach `target` mg/L
    pub fn loading_dose(&self, target: f64) -> Result<f64, ValidationError> {
        Ok(require_positive("target_concentration", target)? * self.vd_l)
    }
}

pub fn calculate_distribution(
    input: &DistributionInput,
    config: &DistributionConfig,
) -> Result<DistributionResult, ValidationError> {
    let dose = require_positive("dose_mg", input.dose_mg)?;
    let c0 = require_positive("initial_concentration", input.initial_concentration)?;
    let weight_kg = require_positive(
        "weight_kg",
        input.weight_kg.unwrap_or(config.default_weight_kg),
    )?;

    let vd_l = dose / c0;
    let vd_l_per_kg = vd_l / weight_kg;

    let mut result = DistributionResult {
        vd_l,
        vd_l_per_kg,
        weight_kg,
        distribution: DistributionType::TABLE.classify(vd_l_per_kg),
        loading_dose_mg: None,
    };
    if let Some(target) = input.target_concentration {
        result.loading_dose_mg = Some(result.loading_dose(target)?);
    }

    debug!("Vd = {:.2} L ({:.3} L/kg)", vd_l, vd_l_per_kg);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weight() {
        let r = calculate_distribution(
            &DistributionInput {
                dose_mg: 500.0,
                initial_concentration: 10.0,
                weight_kg: None,
                target_concentration: None,
            },
            &DistributionConfig::default(),
        )
        .unwrap();
        assert_eq!(r.vd_l, 50.0);
        assert_eq!(r.weight_kg, 70.0);
        assert!((r.vd_l_per_kg - 0.7143).abs() < 1e-4);
        assert_eq!(r.distribution, DistributionType::ModerateTissue);
    }

    #[test]
    fn test_plasma_confined_drug() {
        let r = calculate_distribution(
            &DistributionInput {
                dose_mg: 100.0,
                initial_concentration: 40.0,
                weight_kg: Some(50.0),
                target_concentration: None,
            },
            &DistributionConfig::default(),
        )
        .unwrap();
        assert!((r.vd_l_per_kg - 0.05).abs() < 1e-12);
        assert_eq!(r.distribution, DistributionType::Plasma);
    }

    #[test]
    fn test_loading_dose() {
        let r = calculate_distribution(
            &DistributionInput {
                dose_mg: 500.0,
                initial_concentration: 10.0,
                weight_kg: Some(70.0),
                target_concentration: Some(15.0),
            },
            &DistributionConfig::default(),
        )
        .unwrap();
        assert_eq!(r.loading_dose_mg, Some(750.0));
        assert!(r.loading_dose(0.0).is_err());
    }

    #[test]
    fn test_rejects_non_positive_weight() {
        let result = calculate_distribution(
            &DistributionInput {
                dose_mg: 500.0,
                initial_concentration: 10.0,
                weight_kg: Some(0.0),
                target_concentration: None,
            },
            &DistributionConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_table_covers_six_types() {
        assert_eq!(DistributionType::TABLE.classes().len(), 6);
        assert!(DistributionType::TABLE.is_ordered());
        assert_eq!(DistributionType::TABLE.classify(25.0), DistributionType::TissueSequestration);
    }
}
