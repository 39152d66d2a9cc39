//! Document-level validation tests.

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::fx::FxKind;
use crate::layer::LayerKind;

fn minimal() -> Value {
    json!({
        "name": "beep",
        "description": "a short beep",
        "sample_rate": 44100,
        "duration": 0.2,
        "seed": 1,
        "global": {"amp": 0.8},
        "layers": [{
            "id": "main",
            "type": "osc",
            "amp": 1.0,
            "env": {"attack": 0.0, "decay": 0.1},
            "osc": {"waveform": "sine", "freq": 440.0}
        }]
    })
}

fn errors_of(value: &Value) -> ValidationResult {
    validate_value(value).expect_err("expected validation to fail")
}

fn paths(result: &ValidationResult) -> Vec<&str> {
    result.errors.iter().map(|e| e.path.as_str()).collect()
}

#[test]
fn test_minimal_spec_validates_with_defaults() {
    let spec = validate_value(&minimal()).unwrap();
    assert_eq!(spec.version, SPEC_VERSION);
    assert_eq!(spec.sample_rate, 44100);
    assert!(!spec.global.normalize);
    assert!(spec.fx_chain.is_empty());
    assert!(spec.params.is_empty());
    assert_eq!(spec.num_samples(), 8820);
}

#[test]
fn test_validate_json_syntax_error() {
    let result = validate_json("{\"name\": ").unwrap_err();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].code, ErrorCode::MalformedJson);
    assert_eq!(result.errors[0].display_path(), "(root)");
}

#[test]
fn test_root_must_be_object() {
    let result = errors_of(&json!([1, 2, 3]));
    assert_eq!(result.errors[0].message, "expected an object, got an array");
}

#[test]
fn test_unknown_root_field() {
    let mut value = minimal();
    value["tempo"] = json!(120);
    let result = errors_of(&value);
    assert_eq!(result.field_errors(), vec![("tempo", "unknown field `tempo`")]);
}

#[test]
fn test_unsupported_version() {
    let mut value = minimal();
    value["version"] = json!("soundspec-2");
    let result = errors_of(&value);
    assert_eq!(result.errors[0].code, ErrorCode::UnsupportedVersion);
}

#[test]
fn test_invalid_sample_rate() {
    let mut value = minimal();
    value["sample_rate"] = json!(96000);
    let result = errors_of(&value);
    assert_eq!(
        result.field_errors(),
        vec![(
            "sample_rate",
            "sample_rate must be one of 22050, 44100, 48000, got 96000"
        )]
    );
}

#[test]
fn test_wrong_json_type_reported_at_field() {
    let mut value = minimal();
    value["duration"] = json!("long");
    value["global"]["normalize"] = json!("yes");
    let result = errors_of(&value);
    assert_eq!(paths(&result), vec!["duration", "global.normalize"]);
    assert!(result.errors.iter().all(|e| e.code == ErrorCode::MalformedJson));
}

#[test]
fn test_errors_in_document_order() {
    let mut value = minimal();
    value["duration"] = json!(5.0);
    value["global"]["amp"] = json!(2.0);
    value["layers"][0]["amp"] = json!(-0.5);
    value["fx_chain"] = json!([{"type": "softclip", "params": {"drive": 9.0}}]);
    value["params"] = json!([{"id": "", "label": "x", "kind": "slider", "path": "global.amp"}]);
    let result = errors_of(&value);
    assert_eq!(
        paths(&result),
        vec![
            "duration",
            "global.amp",
            "layers[0].amp",
            "fx_chain[0].params.drive",
            "params[0].id",
        ]
    );
}

#[test]
fn test_sample_ceiling_boundary() {
    // 48000 Hz x 3 s lands exactly on the ceiling.
    let mut value = minimal();
    value["sample_rate"] = json!(48000);
    value["duration"] = json!(3.0);
    let spec = validate_value(&value).unwrap();
    assert_eq!(spec.num_samples(), MAX_SAMPLES);
}

#[test]
fn test_duplicate_layer_ids() {
    let mut value = minimal();
    let layer = value["layers"][0].clone();
    value["layers"] = json!([layer.clone(), layer.clone(), layer]);
    let result = errors_of(&value);
    assert_eq!(
        result.field_errors(),
        vec![
            ("layers[1].id", "duplicate id `main` (first used at layers[0])"),
            ("layers[2].id", "duplicate id `main` (first used at layers[0])"),
        ]
    );
    assert!(result.errors.iter().all(|e| e.code == ErrorCode::DuplicateId));
}

#[test]
fn test_duplicate_param_ids() {
    let mut value = minimal();
    let param = json!({"id": "amp", "label": "Amp", "kind": "slider", "path": "global.amp"});
    value["params"] = json!([param.clone(), param]);
    let result = errors_of(&value);
    assert_eq!(paths(&result), vec!["params[1].id"]);
}

#[test]
fn test_layer_count_bounds() {
    let mut value = minimal();
    value["layers"] = json!([]);
    let result = errors_of(&value);
    assert_eq!(result.errors[0].code, ErrorCode::ListLength);

    let mut value = minimal();
    let layers: Vec<Value> = (0..17)
        .map(|i| {
            let mut layer = value["layers"][0].clone();
            layer["id"] = json!(format!("l{}", i));
            layer
        })
        .collect();
    value["layers"] = Value::Array(layers);
    let result = errors_of(&value);
    assert_eq!(
        result.field_errors(),
        vec![("layers", "layers allows at most 16 entries, got 17")]
    );
}

#[test]
fn test_param_path_must_resolve() {
    let mut value = minimal();
    value["params"] = json!([
        {"id": "a", "label": "A", "kind": "slider", "path": "layers_by_id.main.osc.freq"},
        {"id": "b", "label": "B", "kind": "slider", "path": "layers_by_id.missing.amp"},
        {"id": "c", "label": "C", "kind": "slider", "path": "layers[0].chirp.f_start"}
    ]);
    let result = errors_of(&value);
    assert_eq!(paths(&result), vec!["params[1].path", "params[2].path"]);
    assert!(result.errors.iter().all(|e| e.code == ErrorCode::UnresolvablePath));
    assert_eq!(
        result.errors[0].message,
        "`layers_by_id.missing.amp` does not resolve: no layer with id `missing`"
    );
}

#[test]
fn test_param_kind_must_fit_leaf() {
    let mut value = minimal();
    value["params"] = json!([
        {"id": "n", "label": "N", "kind": "slider", "path": "global.normalize"},
        {"id": "w", "label": "W", "kind": "select", "path": "layers[0].osc.waveform",
         "options": ["sine", "saw", "noise"]},
        {"id": "c", "label": "C", "kind": "checkbox", "path": "global.normalize"}
    ]);
    let result = errors_of(&value);
    assert_eq!(paths(&result), vec!["params[0].kind", "params[1].options[2]"]);
    assert!(result.errors.iter().all(|e| e.code == ErrorCode::InvalidParamBinding));
}

#[test]
fn test_sample_rate_select_binding() {
    let mut value = minimal();
    value["params"] = json!([
        {"id": "sr", "label": "Rate", "kind": "select", "path": "sample_rate",
         "options": ["22050", "48000"]}
    ]);
    assert!(validate_value(&value).is_ok());
}

#[test]
fn test_typed_tree_after_validation() {
    let mut value = minimal();
    value["layers"][0]["filter"] = json!([{"type": "biquad_lp", "cutoff": 2000.0, "cutoff_end": 200.0}]);
    value["fx_chain"] = json!([{"type": "normalize"}]);
    let spec = validate_value(&value).unwrap();
    match &spec.layers[0].kind {
        LayerKind::Osc(osc) => assert_eq!(osc.freq, 440.0),
        other => panic!("unexpected kind {:?}", other),
    }
    assert!(spec.layers[0].filters[0].is_swept());
    assert_eq!(spec.fx_chain[0].kind, FxKind::Normalize { target_peak: 0.95 });
}

#[test]
fn test_round_trip_is_identity() {
    let mut value = minimal();
    value["layers"][0]["mod"] = json!({"tremolo_hz": 6.0, "tremolo_depth": 0.3});
    value["fx_chain"] = json!([{"type": "delay", "params": {"time_ms": 40.0}}]);
    value["params"] = json!([
        {"id": "f", "label": "F", "kind": "slider", "path": "layers[0].osc.freq",
         "min": 100, "max": 1000, "default": 440}
    ]);
    let spec = validate_value(&value).unwrap();
    let again = validate_value(&spec.to_value().unwrap()).unwrap();
    assert_eq!(spec, again);
}

#[test]
fn test_missing_description_warns() {
    let mut value = minimal();
    value.as_object_mut().unwrap().remove("description");
    let (spec, result) = inspect_value(&value);
    assert!(spec.is_some());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].code, WarningCode::MissingDescription);
}

#[test]
fn test_validate_spec_reports_edits() {
    let mut spec = validate_value(&minimal()).unwrap();
    assert!(validate_spec(&spec).is_ok());
    spec.global.amp = 4.0;
    let result = validate_spec(&spec);
    assert_eq!(paths(&result), vec!["global.amp"]);
}

#[test]
fn test_seed_bounds() {
    let mut value = minimal();
    value["seed"] = json!(-1);
    assert!(errors_of(&value).has_error_at("seed"));
    value["seed"] = json!(2_147_483_648_i64);
    assert!(errors_of(&value).has_error_at("seed"));
    value["seed"] = json!(2_147_483_647_i64);
    assert!(validate_value(&value).is_ok());
}
