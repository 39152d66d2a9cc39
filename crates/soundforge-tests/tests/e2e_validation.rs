//! Validation of whole documents: error collection, uniqueness, resource ceiling.

use pretty_assertions::assert_eq;
use serde_json::json;
use soundforge_spec::{
    inspect_value, validate_spec, validate_value, ErrorCode, SoundSpec, MAX_SAMPLES,
};
use soundforge_tests::fixtures::{document, kitchen_sink, load, noise_layer, sine_layer};

#[test]
fn kitchen_sink_validates_without_warnings() {
    let (spec, result) = inspect_value(&kitchen_sink());
    assert!(result.is_ok(), "{}", result);
    assert!(result.warnings.is_empty());
    let spec = spec.unwrap();
    assert_eq!(spec.layers.len(), 6);
    assert_eq!(spec.fx_chain.len(), 4);
    assert!(!spec.fx_chain[3].enabled);
}

#[test]
fn every_bad_field_is_reported() {
    let mut value = document(0.2, 1, json!([sine_layer("a", 440.0), noise_layer("b")]));
    value["global"]["amp"] = json!(2.0);
    value["layers"][0]["osc"]["freq"] = json!(5.0);
    value["layers"][1]["noise"]["color"] = json!("brown");

    let result = validate_value(&value).unwrap_err();
    assert!(result.has_error_at("global.amp"));
    assert!(result.has_error_at("layers[0].osc.freq"));
    assert!(result
        .errors
        .iter()
        .any(|e| e.path.starts_with("layers[1].noise")));
    // Document order: the root-level error comes first.
    assert_eq!(result.errors[0].path, "global.amp");
}

#[test]
fn duplicate_ids_are_always_rejected() {
    let value = document(0.2, 1, json!([sine_layer("x", 440.0), noise_layer("x")]));
    let result = validate_value(&value).unwrap_err();
    assert!(result.has_code(ErrorCode::DuplicateId));
    assert!(result.has_error_at("layers[1].id"));
}

#[test]
fn sample_ceiling_is_enforced_at_validation() {
    // 48000 Hz at 3.0 s lands exactly on the ceiling.
    let mut value = document(3.0, 1, json!([sine_layer("a", 440.0)]));
    value["sample_rate"] = json!(48000);
    let spec = load(&value);
    assert_eq!(spec.num_samples(), MAX_SAMPLES);

    value["duration"] = json!(3.001);
    let result = validate_value(&value).unwrap_err();
    assert!(!result.errors.is_empty());
}

#[test]
fn layer_block_must_match_type() {
    let mut value = document(0.2, 1, json!([sine_layer("a", 440.0)]));
    value["layers"][0]["type"] = json!("fm");
    let result = validate_value(&value).unwrap_err();
    assert!(result.has_code(ErrorCode::UnionMismatch));
}

#[test]
fn hand_edited_spec_is_rechecked() {
    let mut spec: SoundSpec = load(&kitchen_sink());
    assert!(validate_spec(&spec).is_ok());

    spec.layers[0].pan = -3.0;
    spec.seed = u32::MAX;
    let result = validate_spec(&spec);
    assert!(result.has_error_at("layers[0].pan"));
    assert!(result.has_error_at("seed"));
}

#[test]
fn round_trip_is_identity() {
    for value in [kitchen_sink(), document(0.05, 9, json!([noise_layer("n")]))] {
        let spec = load(&value);
        let again = load(&spec.to_value().unwrap());
        assert_eq!(again, spec);
    }
}
