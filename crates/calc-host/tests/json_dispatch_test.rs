use calc_host::{handle_json, HostConfig};
use serde_json::Value;

fn run(config: &HostConfig, body: &str) -> Value {
    let out = handle_json(config, body).expect("request should parse");
    serde_json::from_str(&out).expect("response should be valid JSON")
}

fn approx(v: &Value, expected: f64) -> bool {
    v.as_f64().map(|x| (x - expected).abs() < 1e-6).unwrap_or(false)
}

#[test]
fn test_mass_conversion() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"mass_conversion","value":1.5,"from":"g","to":"mg"}"#,
    );
    assert_eq!(v["status"], "ok");
    assert!(approx(&v["converted"], 1500.0));
}

#[test]
fn test_dilution_reports_solvent() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"dilution","solve_for":"v1","c1":10,"c2":2,"v2":50}"#,
    );
    assert_eq!(v["status"], "ok");
    assert_eq!(v["solved_for"], "v1");
    assert!(approx(&v["value"], 10.0));
    assert!(approx(&v["solvent_to_add"], 40.0));
}

#[test]
fn test_dilution_order_violation() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"dilution","solve_for":"v1","c1":2,"c2":10,"v2":50}"#,
    );
    assert_eq!(v["status"], "error");
    assert!(v["reason"].as_str().is_some());
}

#[test]
fn test_opioid_conversion() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"opioid_conversion","source":"oxycodone","source_route":"oral",
            "dose":20,"target":"morphine","target_route":"oral"}"#,
    );
    assert_eq!(v["status"], "ok");
    assert!(approx(&v["mme"], 30.0));
    assert!(approx(&v["target_dose"], 30.0));
    assert_eq!(v["interpretation"], "typical_range");
}

#[test]
fn test_opioid_invalid_route_rejected() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"opioid_conversion","source":"oxycodone","source_route":"intravenous",
            "dose":20,"target":"morphine","target_route":"oral"}"#,
    );
    assert_eq!(v["status"], "error");
}

#[test]
fn test_pediatric_uses_configured_reference_weight() {
    let body = r#"{"calculator":"pediatric_dose","weight_kg":20,"age_years":6,
                   "adult_dose_mg":300,"rule":"young"}"#;

    let v = run(&HostConfig::default(), body);
    assert!(approx(&v["dose_mg"], 100.0));
    assert!(approx(&v["mg_per_kg"], 5.0));
    assert_eq!(v["age_in_rule_range"], true);

    let mut config = HostConfig::default();
    config.pediatric.reference_adult_weight_kg = 50.0;
    let v = run(&config, body);
    assert!(approx(&v["reference_mg_per_kg"], 6.0));
}

#[test]
fn test_cfu() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"cfu","dilution_factor":100,"colonies":45,"volume_ml":0.1}"#,
    );
    assert!(approx(&v["cfu_per_ml"], 45_000.0));
    assert_eq!(v["validity"], "valid");
}

#[test]
fn test_cfu_invalid_counts_are_reported() {
    for colonies in ["-5", "12.5"] {
        let body = format!(
            r#"{{"calculator":"cfu","dilution_factor":10,"colonies":{},"volume_ml":0.1}}"#,
            colonies
        );
        let v = run(&HostConfig::default(), &body);
        assert_eq!(v["status"], "error");
        assert_eq!(v["field"], "colonies");
    }
}

#[test]
fn test_porosity_rejects_bulk_above_true() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"porosity","method":"density","bulk_density":1.2,"true_density":1.0}"#,
    );
    assert_eq!(v["status"], "error");

    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"porosity","method":"density","bulk_density":0.8,"true_density":1.0}"#,
    );
    assert_eq!(v["status"], "ok");
    assert!(approx(&v["porosity_percent"], 20.0));
    assert_eq!(v["class"], "low");
}

#[test]
fn test_uniformity_too_few_units() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"uniformity","values":[100,100,100],"label_claim":100}"#,
    );
    assert_eq!(v["status"], "error");
}

#[test]
fn test_uniformity_pass() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"uniformity",
            "values":[99.5,100.2,100.8,99.1,100.4,99.9,100.6,99.7,100.1,99.8],
            "label_claim":100}"#,
    );
    assert_eq!(v["status"], "ok");
    assert_eq!(v["verdict"], "pass");
    assert_eq!(v["units"].as_array().map(|u| u.len()), Some(10));
}

#[test]
fn test_dose_response_curve_lengths() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"dose_response","emax":100,"ec50":5,"hill":1}"#,
    );
    assert_eq!(v["status"], "ok");
    assert_eq!(v["linear"].as_array().map(|p| p.len()), Some(101));
    assert_eq!(v["log"].as_array().map(|p| p.len()), Some(121));
}

#[test]
fn test_binding_from_ic50() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"binding","affinity":{"kind":"ic50","value":110},
            "ligand_concentration":10,"receptor_concentration":1}"#,
    );
    assert!(approx(&v["derived_ki"], 100.0));
    assert_eq!(v["class"], "sub_micromolar");
}

#[test]
fn test_therapeutic_index_and_distribution() {
    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"therapeutic_index","td50":100,"ed50":10}"#,
    );
    assert_eq!(v["margin"], "wide");

    let v = run(
        &HostConfig::default(),
        r#"{"calculator":"distribution","dose_mg":500,"initial_concentration":10}"#,
    );
    assert!(approx(&v["vd_l"], 50.0));
    assert!(approx(&v["weight_kg"], 70.0));
}

#[test]
fn test_identical_requests_identical_responses() {
    let body = r#"{"calculator":"osmolar_gap","sodium":140,"glucose":90,"bun":14}"#;
    let config = HostConfig::default();
    assert_eq!(
        handle_json(&config, body).unwrap(),
        handle_json(&config, body).unwrap()
    );
}
