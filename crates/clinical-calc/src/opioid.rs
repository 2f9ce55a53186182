//! Opioid Equianalgesic Conversion
//!
//! Doses are normalized to oral morphine milligram equivalents (MME):
//! `MME = dose * opioid factor * route multiplier`, then scaled back out for
//! the target opioid and route.

use calc_validator::{require_positive, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Target doses below this (mg) should be double-checked
pub const LOW_DOSE_MG: f64 = 1.0;
/// Target doses above this (mg) warrant caution
pub const HIGH_DOSE_MG: f64 = 200.0;
/// Dose reduction for incomplete cross-tolerance, as fractions kept
pub const CROSS_TOLERANCE_KEEP: (f64, f64) = (0.50, 0.75);

/// Route of administration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdministrationRoute {
    Oral,
    Intravenous,
    Subcutaneous,
}

impl AdministrationRoute {
    /// Potency relative to the oral route
    pub fn multiplier(&self) -> f64 {
        match self {
            AdministrationRoute::Oral => 1.0,
            AdministrationRoute::Intravenous | AdministrationRoute::Subcutaneous => 3.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdministrationRoute::Oral => "oral",
            AdministrationRoute::Intravenous => "intravenous",
            AdministrationRoute::Subcutaneous => "subcutaneous",
        }
    }
}

impl fmt::Display for AdministrationRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AdministrationRoute {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oral" | "po" => Ok(AdministrationRoute::Oral),
            "iv" | "intravenous" => Ok(AdministrationRoute::Intravenous),
            "sc" | "subq" | "subcutaneous" => Ok(AdministrationRoute::Subcutaneous),
            _ => Err(ValidationError::UnsupportedOption {
                field: "route",
                value: s.to_string(),
            }),
        }
    }
}

/// Opioids with a published oral morphine conversion factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opioid {
    Morphine,
    Oxycodone,
    Hydrocodone,
    Hydromorphone,
    Oxymorphone,
    Codeine,
    Tramadol,
    Tapentadol,
    Methadone,
    Fentanyl,
}

impl Opioid {
    pub const ALL: [Opioid; 10] = [
        Opioid::Morphine,
        Opioid::Oxycodone,
        Opioid::Hydrocodone,
        Opioid::Hydromorphone,
        Opioid::Oxymorphone,
        Opioid::Codeine,
        Opioid::Tramadol,
        Opioid::Tapentadol,
        Opioid::Methadone,
        Opioid::Fentanyl,
    ];

    /// Oral morphine mg per mg of this opioid, before the route multiplier
    pub fn morphine_factor(&self) -> f64 {
        match self {
            Opioid::Morphine => 1.0,
            Opioid::Oxycodone => 1.5,
            Opioid::Hydrocodone => 1.0,
            Opioid::Hydromorphone => 4.0,
            Opioid::Oxymorphone => 3.0,
            Opioid::Codeine => 0.15,
            Opioid::Tramadol => 0.2,
            Opioid::Tapentadol => 0.4,
            Opioid::Methadone => 4.7,
            Opioid::Fentanyl => 100.0,
        }
    }

    /// Valid routes; the first is the default
    pub fn routes(&self) -> &'static [AdministrationRoute] {
        use AdministrationRoute::*;
        match self {
            Opioid::Morphine | Opioid::Hydromorphone => &[Oral, Intravenous, Subcutaneous],
            Opioid::Fentanyl => &[Intravenous],
            Opioid::Oxycodone
            | Opioid::Hydrocodone
            | Opioid::Oxymorphone
            | Opioid::Codeine
            | Opioid::Tramadol
            | Opioid::Tapentadol
            | Opioid::Methadone => &[Oral],
        }
    }

    pub fn default_route(&self) -> AdministrationRoute {
        self.routes()[0]
    }

    pub fn supports(&self, route: AdministrationRoute) -> bool {
        self.routes().contains(&route)
    }

    /// Keep `route` if valid for this opioid, otherwise fall back to the default
    pub fn reconcile_route(&self, route: AdministrationRoute) -> AdministrationRoute {
        if self.supports(route) {
            route
        } else {
            self.default_route()
        }
    }

    fn check_route(&self, route: AdministrationRoute) -> Result<(), ValidationError> {
        if self.supports(route) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedRoute {
                opioid: self.to_string(),
                route: route.to_string(),
            })
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Opioid::Morphine => "morphine",
            Opioid::Oxycodone => "oxycodone",
            Opioid::Hydrocodone => "hydrocodone",
            Opioid::Hydromorphone => "hydromorphone",
            Opioid::Oxymorphone => "oxymorphone",
            Opioid::Codeine => "codeine",
            Opioid::Tramadol => "tramadol",
            Opioid::Tapentadol => "tapentadol",
            Opioid::Methadone => "methadone",
            Opioid::Fentanyl => "fentanyl",
        }
    }
}

impl fmt::Display for Opioid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Opioid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Opioid::ALL
            .into_iter()
            .find(|o| o.name() == wanted)
            .ok_or_else(|| ValidationError::UnsupportedOption {
                field: "opioid",
                value: s.to_string(),
            })
    }
}

/// Sanity band for the converted dose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseInterpretation {
    /// Below 1 mg
    Verify,
    TypicalRange,
    /// Above 200 mg
    HighDoseCaution,
}

impl DoseInterpretation {
    pub fn from_dose(dose_mg: f64) -> Self {
        if dose_mg < LOW_DOSE_MG {
            DoseInterpretation::Verify
        } else if dose_mg > HIGH_DOSE_MG {
            DoseInterpretation::HighDoseCaution
        } else {
            DoseInterpretation::TypicalRange
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DoseInterpretation::Verify => "Very low dose, verify calculation",
            DoseInterpretation::TypicalRange => "Dose within typical range",
            DoseInterpretation::HighDoseCaution => "High dose, use caution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpioidConversionInput {
    pub source: Opioid,
    pub source_route: AdministrationRoute,
    /// mg
    pub dose: f64,
    pub target: Opioid,
    pub target_route: AdministrationRoute,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpioidConversion {
    /// Oral morphine milligram equivalents
    pub mme: f64,
    /// Equianalgesic target dose (mg)
    pub target_dose: f64,
    /// Target dose after a 25-50% cross-tolerance reduction (mg)
    pub reduced_dose_range: (f64, f64),
    pub interpretation: DoseInterpretation,
}

pub fn convert_opioid(input: &OpioidConversionInput) -> Result<OpioidConversion, ValidationError> {
    input.source.check_route(input.source_route)?;
    input.target.check_route(input.target_route)?;
    let dose = require_positive("dose", input.dose)?;

    let mme = dose * input.source.morphine_factor() * input.source_route.multiplier();
    let target_dose = mme / (input.target.morphine_factor() * input.target_route.multiplier());
    let interpretation = DoseInterpretation::from_dose(target_dose);

    debug!(
        "{} mg {} {} = {:.2} MME = {:.2} mg {} {}",
        dose,
        input.source,
        input.source_route,
        mme,
        target_dose,
        input.target,
        input.target_route
    );

    Ok(OpioidConversion {
        mme,
        target_dose,
        reduced_dose_range: (
            target_dose * CROSS_TOLERANCE_KEEP.0,
            target_dose * CROSS_TOLERANCE_KEEP.1,
        ),
        interpretation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oral(source: Opioid, dose: f64, target: Opioid) -> OpioidConversionInput {
        OpioidConversionInput {
            source,
            source_route: AdministrationRoute::Oral,
            dose,
            target,
            target_route: AdministrationRoute::Oral,
        }
    }

    #[test]
    fn test_oxycodone_to_morphine() {
        let c = convert_opioid(&oral(Opioid::Oxycodone, 20.0, Opioid::Morphine)).unwrap();
        assert!((c.mme - 30.0).abs() < 1e-9);
        assert!((c.target_dose - 30.0).abs() < 1e-9);
        assert_eq!(c.interpretation, DoseInterpretation::TypicalRange);
        assert!((c.reduced_dose_range.0 - 15.0).abs() < 1e-9);
        assert!((c.reduced_dose_range.1 - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_iv_morphine_to_oral() {
        let c = convert_opioid(&OpioidConversionInput {
            source: Opioid::Morphine,
            source_route: AdministrationRoute::Intravenous,
            dose: 10.0,
            target: Opioid::Morphine,
            target_route: AdministrationRoute::Oral,
        })
        .unwrap();
        assert!((c.target_dose - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_low_dose_needs_verification() {
        let c = convert_opioid(&OpioidConversionInput {
            source: Opioid::Codeine,
            source_route: AdministrationRoute::Oral,
            dose: 15.0,
            target: Opioid::Fentanyl,
            target_route: AdministrationRoute::Intravenous,
        })
        .unwrap();
        assert!(c.target_dose < 1.0);
        assert_eq!(c.interpretation, DoseInterpretation::Verify);
    }

    #[test]
    fn test_high_dose_caution() {
        let c = convert_opioid(&oral(Opioid::Methadone, 60.0, Opioid::Morphine)).unwrap();
        assert!((c.mme - 282.0).abs() < 1e-9);
        assert_eq!(c.interpretation, DoseInterpretation::HighDoseCaution);
    }

    #[test]
    fn test_rejects_route_not_offered() {
        let mut input = oral(Opioid::Morphine, 10.0, Opioid::Oxycodone);
        input.target_route = AdministrationRoute::Intravenous;
        let err = convert_opioid(&input).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedRoute {
                opioid: "oxycodone".to_string(),
                route: "intravenous".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_non_positive_dose() {
        assert!(convert_opioid(&oral(Opioid::Morphine, 0.0, Opioid::Oxycodone)).is_err());
    }

    #[test]
    fn test_route_reconciliation() {
        assert_eq!(
            Opioid::Oxycodone.reconcile_route(AdministrationRoute::Intravenous),
            AdministrationRoute::Oral
        );
        assert_eq!(
            Opioid::Fentanyl.reconcile_route(AdministrationRoute::Oral),
            AdministrationRoute::Intravenous
        );
        assert_eq!(
            Opioid::Hydromorphone.reconcile_route(AdministrationRoute::Subcutaneous),
            AdministrationRoute::Subcutaneous
        );
    }

    #[test]
    fn test_every_opioid_has_a_route() {
        for opioid in Opioid::ALL {
            assert!(!opioid.routes().is_empty());
            assert!(opioid.supports(opioid.default_route()));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Hydromorphone".parse::<Opioid>().unwrap(), Opioid::Hydromorphone);
        assert_eq!("IV".parse::<AdministrationRoute>().unwrap(), AdministrationRoute::Intravenous);
        assert!("heroin".parse::<Opioid>().is_err());
    }

    #[test]
    fn test_input_json_shape() {
        let input: OpioidConversionInput = serde_json::from_str(
            r#"{"source":"fentanyl","source_route":"intravenous","dose":0.1,
                "target":"morphine","target_route":"oral"}"#,
        )
        .unwrap();
        assert_eq!(input.source, Opioid::Fentanyl);
        assert_eq!(input.source_route, AdministrationRoute::Intravenous);

        let out = serde_json::to_value(convert_opioid(&input).unwrap()).unwrap();
        assert_eq!(out["interpretation"], "typical_range");
        assert!((out["mme"].as_f64().unwrap() - 30.0).abs() < 1e-9);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn same_drug_and_route_is_identity(dose in 0.01f64..1_000.0, idx in 0usize..Opioid::ALL.len()) {
            let opioid = Opioid::ALL[idx];
            let route = opioid.default_route();
            let input = OpioidConversionInput {
                source: opioid,
                source_route: route,
                dose,
                target: opioid,
                target_route: route,
            };
            let c = convert_opioid(&input).unwrap();
            prop_assert!((c.target_dose - dose).abs() <= dose * 1e-12);
            prop_assert_eq!(c, convert_opioid(&input).unwrap());
        }
    }
}
