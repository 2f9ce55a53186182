//! Therapeutic Index

use calc_validator::{require_positive, BreakpointTable, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Safety margin implied by TD50 / ED50
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyMargin {
    Narrow,
    Low,
    Moderate,
    Wide,
}

impl SafetyMargin {
    pub const TABLE: BreakpointTable<SafetyMargin> = BreakpointTable::new(
        &[2.0, 5.0, 10.0],
        &[
            SafetyMargin::Narrow,
            SafetyMargin::Low,
            SafetyMargin::Moderate,
            SafetyMargin::Wide,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            SafetyMargin::Narrow => "Narrow therapeutic index, monitor closely",
            SafetyMargin::Low => "Low safety margin",
            SafetyMargin::Moderate => "Moderate safety margin",
            SafetyMargin::Wide => "Wide safety margin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TherapeuticIndexInput {
    pub td50: f64,
    pub ed50: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TherapeuticIndexResult {
    pub therapeutic_index: f64,
    pub margin: SafetyMargin,
}

pub fn calculate_therapeutic_index(
    input: &TherapeuticIndexInput,
) -> Result<TherapeuticIndexResult, ValidationError> {
    let td50 = require_positive("td50", input.td50)?;
    let ed50 = require_positive("ed50", input.ed50)?;

    let therapeutic_index = td50 / ed50;
    let margin = SafetyMargin::TABLE.classify(therapeutic_index);
    debug!("TI = {:.2} ({:?})", therapeutic_index, margin);

    Ok(TherapeuticIndexResult {
        therapeutic_index,
        margin,
    })
}
