//! Dilution Solver (C1V1 = C2V2)

use calc_validator::{require_finite, require_not_exceeding, require_positive, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Variable of the dilution equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DilutionVariable {
    /// Stock concentration
    C1,
    /// Stock volume
    V1,
    /// Final concentration
    C2,
    /// Final volume
    V2,
}

/// The three known quantities, tagged by the unknown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum DilutionProblem {
    C1 { v1: f64, c2: f64, v2: f64 },
    V1 { c1: f64, c2: f64, v2: f64 },
    C2 { c1: f64, v1: f64, v2: f64 },
    V2 { c1: f64, v1: f64, c2: f64 },
}

impl DilutionProblem {
    /// Which variable this problem solves for
    pub fn unknown(&self) -> DilutionVariable {
        match self {
            DilutionProblem::C1 { .. } => DilutionVariable::C1,
            DilutionProblem::V1 { .. } => DilutionVariable::V1,
            DilutionProblem::C2 { .. } => DilutionVariable::C2,
            DilutionProblem::V2 { .. } => DilutionVariable::V2,
        }
    }
}

/// Solved dilution with all four quantities filled in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dilution {
    pub solved_for: DilutionVariable,
    /// Value of the solved variable
    pub value: f64,
    pub c1: f64,
    pub v1: f64,
    pub c2: f64,
    pub v2: f64,
    /// Diluent to add (V2 - V1, never negative); only when solving for a volume
    pub solvent_to_add: Option<f64>,
}

/// Solve C1V1 = C2V2 for the missing variable
pub fn solve_dilution(problem: &DilutionProblem) -> Result<Dilution, ValidationError> {
    let (c1, v1, c2, v2) = match *problem {
        DilutionProblem::C1 { v1, c2, v2 } => {
            let v1 = require_positive("v1", v1)?;
            let c2 = require_positive("c2", c2)?;
            let v2 = require_positive("v2", v2)?;
            let c1 = require_finite("c1", c2 * v2 / v1)?;
            require_not_exceeding(("c2", c2), ("c1", c1))?;
            (c1, v1, c2, v2)
        }
        DilutionProblem::V1 { c1, c2, v2 } => {
            let c1 = require_positive("c1", c1)?;
            let c2 = require_positive("c2", c2)?;
            let v2 = require_positive("v2", v2)?;
            require_not_exceeding(("c2", c2), ("c1", c1))?;
            (c1, require_finite("v1", c2 * v2 / c1)?, c2, v2)
        }
        DilutionProblem::C2 { c1, v1, v2 } => {
            let c1 = require_positive("c1", c1)?;
            let v1 = require_positive("v1", v1)?;
            let v2 = require_positive("v2", v2)?;
            (c1, v1, require_finite("c2", c1 * v1 / v2)?, v2)
        }
        DilutionProblem::V2 { c1, v1, c2 } => {
            let c1 = require_positive("c1", c1)?;
            let v1 = require_positive("v1", v1)?;
            let c2 = require_positive("c2", c2)?;
            (c1, v1, c2, require_finite("v2", c1 * v1 / c2)?)
        }
    };

    let solved_for = problem.unknown();
    let value = match solved_for {
        DilutionVariable::C1 => c1,
        DilutionVariable::V1 => v1,
        DilutionVariable::C2 => c2,
        DilutionVariable::V2 => v2,
    };
    let solvent_to_add = match solved_for {
        DilutionVariable::V1 | DilutionVariable::V2 => Some((v2 - v1).max(0.0)),
        DilutionVariable::C1 | DilutionVariable::C2 => None,
    };

    debug!("Dilution solved for {:?}: {}", solved_for, value);

    Ok(Dilution {
        solved_for,
        value,
        c1,
        v1,
        c2,
        v2,
        solvent_to_add,
    })
}
