//! Clinical Calculators
//!
//! Bedside calculations with a categorical interpretation:
//! - Body mass index and ideal weight range
//! - Serum osmolar gap
//! - Opioid equianalgesic conversion via oral morphine equivalents
//! - Pediatric dose scaling (Young, Clark, Fried)

pub mod bmi;
pub mod opioid;
pub mod osmolar;
pub mod pediatric;

pub use bmi::{calculate_bmi, BmiCategory, BmiInput, BmiResult};
pub use opioid::{
    convert_opioid, AdministrationRoute, DoseInterpretation, Opioid, OpioidConversion,
    OpioidConversionInput,
};
pub use osmolar::{
    calculate_osmolar_gap, BunUnit, GlucoseUnit, OsmolarGapClass, OsmolarGapInput,
    OsmolarGapResult,
};
pub use pediatric::{
    calculate_pediatric_dose, DosingRule, PediatricConfig, PediatricDose, PediatricInput,
    ReferenceComparison,
};
