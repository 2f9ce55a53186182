//! Drug-Receptor Binding Affinity
//!
//! Concentrations are in nM. An IC50 is converted to Ki with the
//! Cheng-Prusoff relation `Ki = IC50 / (1 + [L] / Km)`, evaluated as
//! `IC50 * Km / (Km + [L])`.

use calc_validator::{require_positive, BreakpointTable, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Binding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Km assumed for Cheng-Prusoff when only an IC50 is known (nM)
    pub assumed_km: f64,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self { assumed_km: 100.0 }
    }
}

/// Measured affinity constant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AffinityConstant {
    Kd(f64),
    Ki(f64),
    Ic50(f64),
}

/// Affinity bucket by constant magnitude (nM)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffinityClass {
    /// Below 0.1 nM
    Picomolar,
    /// 0.1 to 1 nM
    SubNanomolar,
    /// 1 to 100 nM
    Nanomolar,
    /// 100 nM to 1 µM
    SubMicromolar,
    /// 1 µM and above
    Micromolar,
}

impl AffinityClass {
    pub const TABLE: BreakpointTable<AffinityClass> = BreakpointTable::new(
        &[0.1, 1.0, 100.0, 1_000.0],
        &[
            AffinityClass::Picomolar,
            AffinityClass::SubNanomolar,
            AffinityClass::Nanomolar,
            AffinityClass::SubMicromolar,
            AffinityClass::Micromolar,
        ],
    );

    pub fn label(&self) -> &'static str {
        match self {
            AffinityClass::Picomolar => "Extremely high affinity",
            AffinityClass::SubNanomolar => "Very high affinity",
            AffinityClass::Nanomolar => "High affinity",
            AffinityClass::SubMicromolar => "Moderate affinity",
            AffinityClass::Micromolar => "Low affinity",
        }
    }
}

impl fmt::Display for AffinityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BindingInput {
    pub affinity: AffinityConstant,
    /// Free ligand concentration (nM)
    pub ligand_concentration: f64,
    /// Receptor concentration, as a multiple of the reference density
    pub receptor_concentration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BindingResult {
    /// Kd, Ki, or the Ki derived from IC50 (nM)
    pub affinity_constant: f64,
    /// Present when the constant came from an IC50
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_ki: Option<f64>,
    /// Receptor occupancy (%), capped at 100
    pub occupancy_percent: f64,
    pub class: AffinityClass,
}

pub fn calculate_binding(
    input: &BindingInput,
    config: &BindingConfig,
) -> Result<BindingResult, ValidationError> {
    let ligand = require_positive("ligand_concentration", input.ligand_concentration)?;
    let receptor = require_positive("receptor_concentration", input.receptor_concentration)?;

    let (affinity_constant, derived_ki) = match input.affinity {
        AffinityConstant::Kd(kd) => (require_positive("kd", kd)?, None),
        AffinityConstant::Ki(ki) => (require_positive("ki", ki)?, None),
        AffinityConstant::Ic50(ic50) => {
            let ic50 = require_positive("ic50", ic50)?;
            let km = require_positive("assumed_km", config.assumed_km)?;
            let ki = ic50 * km / (km + ligand);
            (ki, Some(ki))
        }
    };

    let occupancy_percent =
        (ligand * receptor / (affinity_constant + ligand) * 100.0).min(100.0);
    let class = AffinityClass::TABLE.classify(affinity_constant);

    debug!(
        "Binding: K={:.4} nM, occupancy={:.1}% ({})",
        affinity_constant, occupancy_percent, class
    );

    Ok(BindingResult {
        affinity_constant,
        derived_ki,
        occupancy_percent,
        class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(affinity: AffinityConstant) -> BindingInput {
        BindingInput {
            affinity,
            ligand_concentration: 10.0,
            receptor_concentration: 1.0,
        }
    }

    #[test]
    fn test_half_occupancy_at_kd() {
        let r = calculate_binding(&input(AffinityConstant::Kd(10.0)), &BindingConfig::default())
            .unwrap();
        assert!((r.occupancy_percent - 50.0).abs() < 1e-9);
        assert_eq!(r.class, AffinityClass::Nanomolar);
        assert_eq!(r.derived_ki, None);
    }

    #[test]
    fn test_cheng_prusoff() {
        let r = calculate_binding(&input(AffinityConstant::Ic50(110.0)), &BindingConfig::default())
            .unwrap();
        // 110 / (1 + 10/100) = 100
        assert_eq!(r.derived_ki, Some(100.0));
        assert_eq!(r.class, AffinityClass::SubMicromolar);
    }

    #[test]
    fn test_derived_ki_on_breakpoint() {
        // 200 * 100 / (100 + 100) = 100 exactly, the sub-micromolar lower bound
        let r = calculate_binding(
            &BindingInput {
                ligand_concentration: 100.0,
                ..input(AffinityConstant::Ic50(200.0))
            },
            &BindingConfig::default(),
        )
        .unwrap();
        assert_eq!(r.derived_ki, Some(100.0));
        assert_eq!(r.class, AffinityClass::SubMicromolar);
    }

    #[test]
    fn test_occupancy_capped() {
        let r = calculate_binding(
            &BindingInput {
                receptor_concentration: 5.0,
                ..input(AffinityConstant::Ki(0.05))
            },
            &BindingConfig::default(),
        )
        .unwrap();
        assert_eq!(r.occupancy_percent, 100.0);
        assert_eq!(r.class, AffinityClass::Picomolar);
    }

    #[test]
    fn test_affinity_breakpoints() {
        assert_eq!(AffinityClass::TABLE.classify(0.1), AffinityClass::SubNanomolar);
        assert_eq!(AffinityClass::TABLE.classify(1.0), AffinityClass::Nanomolar);
        assert_eq!(AffinityClass::TABLE.classify(1_000.0), AffinityClass::Micromolar);
    }

    #[test]
    fn test_rejects_non_positive() {
        let config = BindingConfig::default();
        assert!(calculate_binding(&input(AffinityConstant::Kd(0.0)), &config).is_err());
        assert!(calculate_binding(
            &BindingInput {
                ligand_concentration: -1.0,
                ..input(AffinityConstant::Kd(1.0))
            },
            &config
        )
        .is_err());
    }

    #[test]
    fn test_affinity_json_shape() {
        let a: AffinityConstant = serde_json::from_str(r#"{"kind":"ic50","value":42.0}"#).unwrap();
        assert_eq!(a, AffinityConstant::Ic50(42.0));
    }
}
