//! Content Uniformity
//!
//! Sample statistics and the USP <905> acceptance value for dosage units.

mod acceptance;
mod statistics;

pub use acceptance::{
    evaluate_uniformity, ReferenceBasis, UniformityConfig, UniformityInput, UniformityResult,
    UniformityVerdict, UnitAssessment,
};
pub use statistics::SampleStatistics;
