//! USP <905> Acceptance Value
//!
//! Unit values are expressed as percent of label claim before the statistic
//! is formed, so `AV = |M - X̄| + k·s` is always on the percent scale the
//! L1/L2 limits are written in.

use crate::statistics::SampleStatistics;
use calc_validator::{require_non_negative, require_positive, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Content uniformity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformityConfig {
    /// Minimum number of units tested
    pub min_units: usize,
    /// Maximum allowed acceptance value (stage 1)
    pub l1: f64,
    /// Acceptance value ceiling for continuing to stage 2
    pub l2: f64,
    /// Acceptability constant below `pooled_units`
    pub k_single_stage: f64,
    /// Acceptability constant at `pooled_units` or more
    pub k_pooled: f64,
    /// Unit count at which the pooled constant applies
    pub pooled_units: usize,
    /// Individual unit limits (% of label)
    pub unit_limits_percent: (f64, f64),
    /// Mean band (% of label) inside which M equals the mean
    pub reference_band_percent: (f64, f64),
    /// Passing units required to continue with stage 2
    pub stage2_required_passes: usize,
}

impl Default for UniformityConfig {
    fn default() -> Self {
        Self {
            min_units: 10,
            l1: 15.0,
            l2: 25.0,
            k_single_stage: 2.4,
            k_pooled: 2.0,
            pooled_units: 30,
            unit_limits_percent: (85.0, 115.0),
            reference_band_percent: (98.5, 101.5),
            stage2_required_passes: 24,
        }
    }
}

impl UniformityConfig {
    /// Acceptability constant for a sample of `n` units
    pub fn k_for(&self, n: usize) -> f64 {
        if n >= self.pooled_units {
            self.k_pooled
        } else {
            self.k_single_stage
        }
    }
}

/// How the reference value M was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceBasis {
    /// Mean inside the reference band; M = mean
    Mean,
    /// Mean below the band; M = lower band edge
    LowerLimit,
    /// Mean above the band; M = upper band edge
    UpperLimit,
}

/// Final outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniformityVerdict {
    Pass,
    TestStage2,
    Fail,
}

impl UniformityVerdict {
    pub fn label(&self) -> &'static str {
        match self {
            UniformityVerdict::Pass => "PASS",
            UniformityVerdict::TestStage2 => "TEST STAGE 2",
            UniformityVerdict::Fail => "FAIL",
        }
    }
}

impl fmt::Display for UniformityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Assessment of one dosage unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitAssessment {
    pub value: f64,
    pub percent_of_label: f64,
    pub within_limits: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformityInput {
    /// Content (or weight-derived content) of each unit
    pub values: Vec<f64>,
    /// Label claim in the same units as `values`
    pub label_claim: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformityResult {
    /// Statistics in the units of the input values
    pub statistics: SampleStatistics,
    /// Mean as percent of label claim
    pub mean_percent: f64,
    /// Standard deviation on the percent scale
    pub std_dev_percent: f64,
    pub reference_basis: ReferenceBasis,
    /// M (% of label)
    pub reference_value: f64,
    pub k: f64,
    pub acceptance_value: f64,
    pub units: Vec<UnitAssessment>,
    pub passing_units: usize,
    pub verdict: UniformityVerdict,
}

/// Evaluate a set of dosage units against USP <905>
pub fn evaluate_uniformity(
    input: &UniformityInput,
    config: &UniformityConfig,
) -> Result<UniformityResult, ValidationError> {
    if input.values.len() < config.min_units {
        return Err(ValidationError::InsufficientSamples {
            required: config.min_units,
            actual: input.values.len(),
        });
    }
    let label_claim = require_positive("label_claim", input.label_claim)?;
    for &v in &input.values {
        require_non_negative("unit_value", v)?;
    }

    let statistics = SampleStatistics::compute(&input.values)?;
    let percents: Vec<f64> = input
        .values
        .iter()
        .map(|v| v * 100.0 / label_claim)
        .collect();
    let percent_stats = SampleStatistics::compute(&percents)?;
    let mean_percent = percent_stats.mean;
    let std_dev_percent = percent_stats.std_dev;

    let (lo_band, hi_band) = config.reference_band_percent;
    let (reference_basis, reference_value) = if mean_percent < lo_band {
        (ReferenceBasis::LowerLimit, lo_band)
    } else if mean_percent > hi_band {
        (ReferenceBasis::UpperLimit, hi_band)
    } else {
        (ReferenceBasis::Mean, mean_percent)
    };

    let k = config.k_for(input.values.len());
    let acceptance_value = (reference_value - mean_percent).abs() + k * std_dev_percent;

    let (lo_unit, hi_unit) = config.unit_limits_percent;
    let units: Vec<UnitAssessment> = input
        .values
        .iter()
        .zip(&percents)
        .map(|(&value, &percent_of_label)| UnitAssessment {
            value,
            percent_of_label,
            within_limits: percent_of_label >= lo_unit && percent_of_label <= hi_unit,
        })
        .collect();
    let passing_units = units.iter().filter(|u| u.within_limits).count();

    let verdict = if acceptance_value <= config.l1 && passing_units == units.len() {
        UniformityVerdict::Pass
    } else if acceptance_value > config.l1
        && acceptance_value <= config.l2
        && passing_units >= config.stage2_required_passes
    {
        UniformityVerdict::TestStage2
    } else {
        UniformityVerdict::Fail
    };

    debug!(
        "Uniformity: n={} mean={:.2}% AV={:.2} -> {}",
        units.len(),
        mean_percent,
        acceptance_value,
        verdict
    );

    Ok(UniformityResult {
        statistics,
        mean_percent,
        std_dev_percent,
        reference_basis,
        reference_value,
        k,
        acceptance_value,
        units,
        passing_units,
        verdict,
    })
}
