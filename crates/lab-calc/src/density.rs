//! Density, Powder Flow, and Porosity

use calc_validator::{
    require_non_negative, require_not_exceeding, require_positive, BreakpointTable,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Powder sample measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityInput {
    /// Gross sample mass (g)
    pub mass_g: f64,
    /// Measured volume (mL)
    pub volume_ml: f64,
    /// Container tare, subtracted for bulk density (g)
    #[serde(default)]
    pub container_mass_g: Option<f64>,
    /// Container dead volume, subtracted for tapped density (mL)
    #[serde(default)]
    pub container_volume_ml: Option<f64>,
}

/// Densities in g/mL
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityResult {
    pub true_density: f64,
    pub bulk_density: f64,
    pub tapped_density: f64,
    /// Carr index and Hausner ratio, when tapped density is not below bulk
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowProperties>,
}

/// Compute true, bulk and tapped density
pub fn calculate_density(input: &DensityInput) -> Result<DensityResult, ValidationError> {
    let mass = require_positive("mass_g", input.mass_g)?;
    let volume = require_positive("volume_ml", input.volume_ml)?;
    let container_mass = input
        .container_mass_g
        .map(|m| require_non_negative("container_mass_g", m))
        .transpose()?
        .unwrap_or(0.0);
    let container_volume = input
        .container_volume_ml
        .map(|v| require_non_negative("container_volume_ml", v))
        .transpose()?
        .unwrap_or(0.0);

    let net_mass = require_positive("net_mass_g", mass - container_mass)?;

    let true_density = mass / volume;
    let bulk_density = net_mass / volume;
    let tapped_density = if volume > container_volume {
        mass / (volume - container_volume)
    } else {
        true_density
    };

    debug!(
        "Density: true={:.4} bulk={:.4} tapped={:.4} g/mL",
        true_density, bulk_density, tapped_density
    );

    Ok(DensityResult {
        true_density,
        bulk_density,
        tapped_density,
        flow: flow_properties(bulk_density, tapped_density).ok(),
    })
}

/// Flowability grade from the compressibility index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowCharacter {
    Excellent,
    Good,
    Fair,
    Passable,
    Poor,
    VeryPoor,
    VeryVeryPoor,
}

impl FlowCharacter {
    pub const TABLE: BreakpointTable<FlowCharacter> = BreakpointTable::new(
        &[11.0, 16.0, 21.0, 26.0, 32.0, 38.0],
        &[
            FlowCharacter::Excellent,
            FlowCharacter::Good,
            FlowCharacter::Fair,
            FlowCharacter::Passable,
            FlowCharacter::Poor,
            FlowCharacter::VeryPoor,
            FlowCharacter::VeryVeryPoor,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            FlowCharacter::Excellent => "Excellent",
            FlowCharacter::Good => "Good",
            FlowCharacter::Fair => "Fair",
            FlowCharacter::Passable => "Passable",
            FlowCharacter::Poor => "Poor",
            FlowCharacter::VeryPoor => "Very poor",
            FlowCharacter::VeryVeryPoor => "Very, very poor",
        }
    }
}

/// Compressibility of a powder bed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowProperties {
    /// Carr's compressibility index (%)
    pub carr_index: f64,
    pub hausner_ratio: f64,
    pub character: FlowCharacter,
}

/// Carr index and Hausner ratio from bulk and tapped density
pub fn flow_properties(bulk_density: f64, tapped_density: f64) -> Result<FlowProperties, ValidationError> {
    let bulk = require_positive("bulk_density", bulk_density)?;
    let tapped = require_positive("tapped_density", tapped_density)?;
    require_not_exceeding(("bulk_density", bulk), ("tapped_density", tapped))?;

    let carr_index = 100.0 * (tapped - bulk) / tapped;
    Ok(FlowProperties {
        carr_index,
        hausner_ratio: tapped / bulk,
        character: FlowCharacter::TABLE.classify(carr_index),
    })
}

/// Porosity measurement, by densities or by volumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PorosityInput {
    Density {
        bulk_density: f64,
        true_density: f64,
    },
    Volume {
        total_volume: f64,
        solid_volume: f64,
    },
}

/// Porosity bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PorosityClass {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl PorosityClass {
    pub const TABLE: BreakpointTable<PorosityClass> = BreakpointTable::new(
        &[10.0, 25.0, 40.0, 60.0],
        &[
            PorosityClass::VeryLow,
            PorosityClass::Low,
            PorosityClass::Moderate,
            PorosityClass::High,
            PorosityClass::VeryHigh,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            PorosityClass::VeryLow => "Very low porosity (dense compact)",
            PorosityClass::Low => "Low porosity",
            PorosityClass::Moderate => "Moderate porosity",
            PorosityClass::High => "High porosity",
            PorosityClass::VeryHigh => "Very high porosity (loose powder)",
        }
    }
}

impl fmt::Display for PorosityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Porosity result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Porosity {
    /// ε (%)
    pub porosity_percent: f64,
    pub void_fraction: f64,
    pub solid_fraction: f64,
    pub class: PorosityClass,
}

/// Compute porosity; never negative
pub fn calculate_porosity(input: &PorosityInput) -> Result<Porosity, ValidationError> {
    let porosity_percent = match *input {
        PorosityInput::Density {
            bulk_density,
            true_density,
        } => {
            let bulk = require_positive("bulk_density", bulk_density)?;
            let true_density = require_positive("true_density", true_density)?;
            require_not_exceeding(("bulk_density", bulk), ("true_density", true_density))?;
            (1.0 - bulk / true_density) * 100.0
        }
        PorosityInput::Volume {
            total_volume,
            solid_volume,
        } => {
            let total = require_positive("total_volume", total_volume)?;
            let solid = require_non_negative("solid_volume", solid_volume)?;
            require_not_exceeding(("solid_volume", solid), ("total_volume", total))?;
            (total - solid) / total * 100.0
        }
    };

    let void_fraction = porosity_percent / 100.0;
    debug!("Porosity: {:.2}%", porosity_percent);

    Ok(Porosity {
        porosity_percent,
        void_fraction,
        solid_fraction: 1.0 - void_fraction,
        class: PorosityClass::TABLE.classify(porosity_percent),
    })
}
