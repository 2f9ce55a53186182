//! Laboratory Calculators
//!
//! Pure calculators for bench work:
//! - C1V1 = C2V2 dilution solver
//! - Heat of neutralization (calorimetry)
//! - Colony forming units from plate counts
//! - True/bulk/tapped density, powder flow, and porosity

pub mod cfu;
pub mod density;
pub mod dilution;
pub mod neutralization;

pub use cfu::{calculate_cfu, CfuInput, CfuResult, ConcentrationLevel, CountValidity, PlatedVolume};
pub use density::{
    calculate_density, calculate_porosity, flow_properties, DensityInput, DensityResult,
    FlowCharacter, FlowProperties, Porosity, PorosityClass, PorosityInput,
};
pub use dilution::{solve_dilution, Dilution, DilutionProblem, DilutionVariable};
pub use neutralization::{
    calculate_heat, EnthalpyClass, HeatDirection, HeatMagnitude, NeutralizationInput,
    NeutralizationResult,
};
