//! Heat of Neutralization
//!
//! Calorimetry on the mixed acid and base solutions:
//! `Q = (m_acid + m_base) * c * (T2 - T1)`, optionally per mole of limiting
//! reactant.

use calc_validator::{require_positive, BreakpointTable, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use units::{convert, MassUnit, TemperatureUnit};

/// Specific heat of water (J/g·°C)
pub const WATER_SPECIFIC_HEAT: f64 = 4.184;

fn default_specific_heat() -> f64 {
    WATER_SPECIFIC_HEAT
}

/// Calorimetry inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralizationInput {
    pub acid_mass: f64,
    #[serde(default = "grams")]
    pub acid_mass_unit: MassUnit,
    pub base_mass: f64,
    #[serde(default = "grams")]
    pub base_mass_unit: MassUnit,
    /// Specific heat capacity (J/g·°C)
    #[serde(default = "default_specific_heat")]
    pub specific_heat: f64,
    pub initial_temperature: f64,
    pub final_temperature: f64,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    /// Moles of limiting reactant, for the molar enthalpy
    #[serde(default)]
    pub moles: Option<f64>,
}

fn grams() -> MassUnit {
    MassUnit::G
}

/// Sign of the heat change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatDirection {
    /// Solution warmed (heat released)
    Exothermic,
    /// Solution cooled (heat absorbed)
    Endothermic,
    /// No temperature change
    None,
}

/// Magnitude of |Q| in kJ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatMagnitude {
    Negligible,
    Moderate,
    Significant,
    Large,
}

impl HeatMagnitude {
    pub const TABLE: BreakpointTable<HeatMagnitude> = BreakpointTable::new(
        &[1.0, 10.0, 50.0],
        &[
            HeatMagnitude::Negligible,
            HeatMagnitude::Moderate,
            HeatMagnitude::Significant,
            HeatMagnitude::Large,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            HeatMagnitude::Negligible => "Minimal heat change",
            HeatMagnitude::Moderate => "Moderate heat change",
            HeatMagnitude::Significant => "Significant heat change",
            HeatMagnitude::Large => "Large heat change",
        }
    }
}

/// Magnitude of |ΔH| in kJ/mol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnthalpyClass {
    /// Typical of weak acid or weak base pairs
    Low,
    Intermediate,
    /// Close to the ~57 kJ/mol of a strong acid with a strong base
    StrongAcidStrongBase,
    UnusuallyHigh,
}

impl EnthalpyClass {
    pub const TABLE: BreakpointTable<EnthalpyClass> = BreakpointTable::new(
        &[20.0, 50.0, 65.0],
        &[
            EnthalpyClass::Low,
            EnthalpyClass::Intermediate,
            EnthalpyClass::StrongAcidStrongBase,
            EnthalpyClass::UnusuallyHigh,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            EnthalpyClass::Low => "Low enthalpy, typical of weak acid or weak base",
            EnthalpyClass::Intermediate => "Intermediate enthalpy",
            EnthalpyClass::StrongAcidStrongBase => "Typical strong acid / strong base neutralization",
            EnthalpyClass::UnusuallyHigh => "Unusually high enthalpy, check inputs",
        }
    }
}

impl fmt::Display for EnthalpyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calorimetry result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralizationResult {
    /// Combined solution mass (g)
    pub total_mass_g: f64,
    /// T2 - T1 (°C)
    pub delta_t_c: f64,
    /// Heat change (J); positive when heat is released
    pub heat_j: f64,
    pub heat_kj: f64,
    pub direction: HeatDirection,
    pub magnitude: HeatMagnitude,
    /// Molar enthalpy (kJ/mol), when moles were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enthalpy_kj_per_mol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enthalpy_class: Option<EnthalpyClass>,
}

/// Compute the heat released or absorbed by the neutralization
pub fn calculate_heat(input: &NeutralizationInput) -> Result<NeutralizationResult, ValidationError> {
    let acid_g = convert(
        require_positive("acid_mass", input.acid_mass)?,
        input.acid_mass_unit,
        MassUnit::G,
    )?;
    let base_g = convert(
        require_positive("base_mass", input.base_mass)?,
        input.base_mass_unit,
        MassUnit::G,
    )?;
    let specific_heat = require_positive("specific_heat", input.specific_heat)?;
    let t1 = input
        .temperature_unit
        .to_celsius("initial_temperature", input.initial_temperature)?;
    let t2 = input
        .temperature_unit
        .to_celsius("final_temperature", input.final_temperature)?;
    let moles = input
        .moles
        .map(|m| require_positive("moles", m))
        .transpose()?;

    let total_mass_g = acid_g + base_g;
    let delta_t_c = t2 - t1;
    let heat_j = total_mass_g * specific_heat * delta_t_c;
    let heat_kj = heat_j / 1000.0;

    let direction = if heat_j > 0.0 {
        HeatDirection::Exothermic
    } else if heat_j < 0.0 {
        HeatDirection::Endothermic
    } else {
        HeatDirection::None
    };

    let enthalpy_kj_per_mol = moles.map(|n| heat_kj / n);
    let enthalpy_class = enthalpy_kj_per_mol.map(|h| EnthalpyClass::TABLE.classify(h.abs()));

    debug!(
        "Neutralization: Q={:.2} J over {:.2} g, ΔT={:.2} °C",
        heat_j, total_mass_g, delta_t_c
    );

    Ok(NeutralizationResult {
        total_mass_g,
        delta_t_c,
        heat_j,
        heat_kj,
        direction,
        magnitude: HeatMagnitude::TABLE.classify(heat_kj.abs()),
        enthalpy_kj_per_mol,
        enthalpy_class,
    })
}
