//! Pharmacology Calculators
//!
//! - Hill-equation dose-response curves (linear and log dose axes)
//! - Receptor binding affinity and occupancy (Cheng-Prusoff for IC50)
//! - Therapeutic index
//! - Volume of distribution

pub mod binding;
pub mod distribution;
pub mod dose_response;
pub mod therapeutic_index;

pub use binding::{
    calculate_binding, AffinityClass, AffinityConstant, BindingConfig, BindingInput,
    BindingResult,
};
pub use distribution::{
    calculate_distribution, DistributionConfig, DistributionInput, DistributionResult,
    DistributionType,
};
pub use dose_response::{
    generate_curves, CurveConfig, CurvePoints, DosePoint, DoseResponseCurves, HillModel,
    HillParameters,
};
pub use therapeutic_index::{
    calculate_therapeutic_index, SafetyMargin, TherapeuticIndexInput, TherapeuticIndexResult,
};
