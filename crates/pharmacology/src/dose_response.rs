//! Hill Equation Dose-Response
//!
//! `E(d) = baseline + Emax * d^n / (EC50^n + d^n)`, capped at 100 %.
//!
//! Curves are generated lazily by [`CurvePoints`]; each point is computed
//! from its index, so a cloned iterator replays the same curve.

use calc_validator::{require_positive, require_range, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum reported effect (%)
pub const MAX_EFFECT: f64 = 100.0;
/// Allowed Hill coefficient range
pub const HILL_RANGE: (f64, f64) = (0.1, 5.0);
/// Allowed Emax and baseline range (%)
pub const PERCENT_RANGE: (f64, f64) = (0.0, 100.0);
/// Upper bound on points in a single curve
pub const MAX_CURVE_POINTS: usize = 10_000;

/// Dose axis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Upper end of the linear dose axis (starts at 0)
    pub linear_max_dose: f64,
    /// Linear axis step
    pub linear_step: f64,
    /// Log axis spans EC50 * 10^-decades .. EC50 * 10^decades
    pub log_decades: u32,
    pub points_per_decade: u32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            linear_max_dose: 100.0,
            linear_step: 1.0,
            log_decades: 3,
            points_per_decade: 20,
        }
    }
}

/// Hill model parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HillParameters {
    /// Maximal effect above baseline (%)
    pub emax: f64,
    pub ec50: f64,
    /// Hill coefficient (steepness)
    pub hill: f64,
    /// Effect at zero dose (%)
    #[serde(default)]
    pub baseline: f64,
}

/// A single curve point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosePoint {
    pub dose: f64,
    pub effect: f64,
}

/// Validated Hill model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillModel {
    params: HillParameters,
}

impl HillModel {
    pub fn new(params: HillParameters) -> Result<Self, ValidationError> {
        require_range("emax", params.emax, PERCENT_RANGE)?;
        require_positive("ec50", params.ec50)?;
        require_range("hill", params.hill, HILL_RANGE)?;
        require_range("baseline", params.baseline, PERCENT_RANGE)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &HillParameters {
        &self.params
    }

    /// Effect (%) at a non-negative dose
    pub fn effect_at(&self, dose: f64) -> f64 {
        let p = &self.params;
        let dn = dose.max(0.0).powf(p.hill);
        let effect = p.baseline + p.emax * dn / (p.ec50.powf(p.hill) + dn);
        effect.min(MAX_EFFECT)
    }

    /// Dose giving `fraction` of Emax (e.g. 0.8 for EC80)
    pub fn dose_for_fraction(&self, fraction: f64) -> Result<f64, ValidationError> {
        let f = require_positive("fraction", fraction)?;
        if f >= 1.0 {
            return Err(ValidationError::OutOfRange {
                field: "fraction",
                value: f,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(self.params.ec50 * (f / (1.0 - f)).powf(1.0 / self.params.hill))
    }

    /// Points on the linear axis `0, step, 2*step, ..., max`
    pub fn linear_curve(&self, config: &CurveConfig) -> Result<CurvePoints, ValidationError> {
        let max = require_positive("linear_max_dose", config.linear_max_dose)?;
        let step = require_positive("linear_step", config.linear_step)?;
        let len = require_curve_len("linear_points", (max / step + 1e-9).floor() + 1.0)?;
        Ok(CurvePoints {
            model: *self,
            axis: Axis::Linear { step },
            index: 0,
            len,
        })
    }

    /// Log-spaced points from EC50 * 10^-decades to EC50 * 10^decades
    pub fn log_curve(&self, config: &CurveConfig) -> Result<CurvePoints, ValidationError> {
        if config.log_decades == 0 || config.points_per_decade == 0 {
            return Err(ValidationError::NotPositive {
                field: "log_axis",
                value: 0.0,
            });
        }
        let per_decade = config.points_per_decade as usize;
        let len = require_curve_len(
            "log_points",
            2.0 * config.log_decades as f64 * per_decade as f64 + 1.0,
        )?;
        Ok(CurvePoints {
            model: *self,
            axis: Axis::Log {
                start_log10: self.params.ec50.log10() - config.log_decades as f64,
                step_log10: 1.0 / per_decade as f64,
            },
            index: 0,
            len,
        })
    }
}

fn require_curve_len(field: &'static str, points: f64) -> Result<usize, ValidationError> {
    require_range(field, points, (1.0, MAX_CURVE_POINTS as f64)).map(|n| n as usize)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Axis {
    Linear { step: f64 },
    Log { start_log10: f64, step_log10: f64 },
}

impl Axis {
    fn dose(&self, index: usize) -> f64 {
        match *self {
            Axis::Linear { step } => index as f64 * step,
            Axis::Log {
                start_log10,
                step_log10,
            } => 10f64.powf(start_log10 + index as f64 * step_log10),
        }
    }
}

/// Lazy, finite sequence of curve points
#[derive(Debug, Clone)]
pub struct CurvePoints {
    model: HillModel,
    axis: Axis,
    index: usize,
    len: usize,
}

impl Iterator for CurvePoints {
    type Item = DosePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let dose = self.axis.dose(self.index);
        self.index += 1;
        Some(DosePoint {
            dose,
            effect: self.model.effect_at(dose),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurvePoints {}

/// Both curves plus landmark doses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseResponseCurves {
    pub parameters: HillParameters,
    pub linear: Vec<DosePoint>,
    pub log: Vec<DosePoint>,
    /// Dose giving 20 % of Emax
    pub ec20: f64,
    /// Dose giving 80 % of Emax
    pub ec80: f64,
}

/// Materialize both curves for a parameter set
pub fn generate_curves(
    params: &HillParameters,
    config: &CurveConfig,
) -> Result<DoseResponseCurves, ValidationError> {
    let model = HillModel::new(*params)?;
    let linear: Vec<DosePoint> = model.linear_curve(config)?.collect();
    let log: Vec<DosePoint> = model.log_curve(config)?.collect();

    debug!(
        "Dose-response: {} linear and {} log points (EC50={})",
        linear.len(),
        log.len(),
        params.ec50
    );

    Ok(DoseResponseCurves {
        parameters: *params,
        linear,
        log,
        ec20: model.dose_for_fraction(0.2)?,
        ec80: model.dose_for_fraction(0.8)?,
    })
}
