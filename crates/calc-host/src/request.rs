//! Calculator requests and dispatch

use calc_validator::ValidationError;
use clinical_calc::{
    calculate_bmi, calculate_osmolar_gap, calculate_pediatric_dose, convert_opioid, BmiInput,
    BmiResult, OpioidConversion, OpioidConversionInput, OsmolarGapInput, OsmolarGapResult,
    PediatricDose, PediatricInput,
};
use lab_calc::{
    calculate_cfu, calculate_density, calculate_heat, calculate_porosity, solve_dilution,
    CfuInput, CfuResult, DensityInput, DensityResult, Dilution, DilutionProblem,
    NeutralizationInput, NeutralizationResult, Porosity, PorosityInput,
};
use pharmacology::{
    calculate_binding, calculate_distribution, calculate_therapeutic_index, generate_curves,
    BindingInput, BindingResult, DistributionInput, DistributionResult, DoseResponseCurves,
    HillParameters, TherapeuticIndexInput, TherapeuticIndexResult,
};
use serde::{Deserialize, Serialize};
use uniformity::{evaluate_uniformity, UniformityInput, UniformityResult};
use units::{convert_mass, MassConversion, MassConversionInput};

use crate::config::HostConfig;

/// One calculation, selected by the `calculator` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    MassConversion(MassConversionInput),
    Dilution(DilutionProblem),
    Neutralization(NeutralizationInput),
    Bmi(BmiInput),
    OpioidConversion(OpioidConversionInput),
    PediatricDose(PediatricInput),
    OsmolarGap(OsmolarGapInput),
    Cfu(CfuInput),
    Density(DensityInput),
    Porosity(PorosityInput),
    Uniformity(UniformityInput),
    DoseResponse(HillParameters),
    Binding(BindingInput),
    TherapeuticIndex(TherapeuticIndexInput),
    Distribution(DistributionInput),
}

impl CalculationRequest {
    /// Calculator name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            CalculationRequest::MassConversion(_) => "mass_conversion",
            CalculationRequest::Dilution(_) => "dilution",
            CalculationRequest::Neutralization(_) => "neutralization",
            CalculationRequest::Bmi(_) => "bmi",
            CalculationRequest::OpioidConversion(_) => "opioid_conversion",
            CalculationRequest::PediatricDose(_) => "pediatric_dose",
            CalculationRequest::OsmolarGap(_) => "osmolar_gap",
            CalculationRequest::Cfu(_) => "cfu",
            CalculationRequest::Density(_) => "density",
            CalculationRequest::Porosity(_) => "porosity",
            CalculationRequest::Uniformity(_) => "uniformity",
            CalculationRequest::DoseResponse(_) => "dose_response",
            CalculationRequest::Binding(_) => "binding",
            CalculationRequest::TherapeuticIndex(_) => "therapeutic_index",
            CalculationRequest::Distribution(_) => "distribution",
        }
    }
}

/// Result of a calculation, tagged like the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationResponse {
    MassConversion(MassConversion),
    Dilution(Dilution),
    Neutralization(NeutralizationResult),
    Bmi(BmiResult),
    OpioidConversion(OpioidConversion),
    PediatricDose(PediatricDose),
    OsmolarGap(OsmolarGapResult),
    Cfu(CfuResult),
    Density(DensityResult),
    Porosity(Porosity),
    Uniformity(UniformityResult),
    DoseResponse(DoseResponseCurves),
    Binding(BindingResult),
    TherapeuticIndex(TherapeuticIndexResult),
    Distribution(DistributionResult),
}

/// Route a request to its calculator
pub fn dispatch(
    config: &HostConfig,
    request: CalculationRequest,
) -> Result<CalculationResponse, ValidationError> {
    use CalculationRequest as Req;
    use CalculationResponse as Resp;

    let response = match request {
        Req::MassConversion(input) => Resp::MassConversion(convert_mass(&input)?),
        Req::Dilution(problem) => Resp::Dilution(solve_dilution(&problem)?),
        Req::Neutralization(input) => Resp::Neutralization(calculate_heat(&input)?),
        Req::Bmi(input) => Resp::Bmi(calculate_bmi(&input)?),
        Req::OpioidConversion(input) => Resp::OpioidConversion(convert_opioid(&input)?),
        Req::PediatricDose(input) => {
            Resp::PediatricDose(calculate_pediatric_dose(&input, &config.pediatric)?)
        }
        Req::OsmolarGap(input) => Resp::OsmolarGap(calculate_osmolar_gap(&input)?),
        Req::Cfu(input) => Resp::Cfu(calculate_cfu(&input)?),
        Req::Density(input) => Resp::Density(calculate_density(&input)?),
        Req::Porosity(input) => Resp::Porosity(calculate_porosity(&input)?),
        Req::Uniformity(input) => {
            Resp::Uniformity(evaluate_uniformity(&input, &config.uniformity)?)
        }
        Req::DoseResponse(params) => Resp::DoseResponse(generate_curves(&params, &config.curves)?),
        Req::Binding(input) => Resp::Binding(calculate_binding(&input, &config.binding)?),
        Req::TherapeuticIndex(input) => {
            Resp::TherapeuticIndex(calculate_therapeutic_index(&input)?)
        }
        Req::Distribution(input) => {
            Resp::Distribution(calculate_distribution(&input, &config.distribution)?)
        }
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_bmi() {
        let response = dispatch(
            &HostConfig::default(),
            CalculationRequest::Bmi(BmiInput {
                height_cm: 175.0,
                weight_kg: 70.0,
            }),
        )
        .unwrap();
        match response {
            CalculationResponse::Bmi(result) => assert!((result.bmi - 22.857).abs() < 1e-3),
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_uses_config() {
        let mut config = HostConfig::default();
        config.distribution.default_weight_kg = 50.0;
        let response = dispatch(
            &config,
            CalculationRequest::Distribution(DistributionInput {
                dose_mg: 100.0,
                initial_concentration: 2.0,
                weight_kg: None,
                target_concentration: None,
            }),
        )
        .unwrap();
        match response {
            CalculationResponse::Distribution(result) => {
                assert_eq!(result.weight_kg, 50.0);
                assert_eq!(result.vd_l_per_kg, 1.0);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_propagates_validation_error() {
        let err = dispatch(
            &HostConfig::default(),
            CalculationRequest::TherapeuticIndex(TherapeuticIndexInput {
                td50: 10.0,
                ed50: 0.0,
            }),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("ed50"));
    }

    #[test]
    fn test_request_tag() {
        let request: CalculationRequest =
            serde_json::from_str(r#"{"calculator":"therapeutic_index","td50":50,"ed50":5}"#)
                .unwrap();
        assert_eq!(request.name(), "therapeutic_index");
    }

    #[test]
    fn test_nested_tags() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"calculator":"dilution","solve_for":"v1","c1":10,"c2":2,"v2":50}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            CalculationRequest::Dilution(DilutionProblem::V1 {
                c1: 10.0,
                c2: 2.0,
                v2: 50.0
            })
        );
    }
}
