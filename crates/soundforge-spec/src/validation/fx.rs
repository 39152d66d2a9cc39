//! Effect validation.

use serde_json::Value;

use crate::choice::FxType;
use crate::error::{ErrorCode, ValidationResult};
use crate::fx::{Fx, FxKind, DEFAULT_HOLD_SAMPLES, DEFAULT_STEPS};
use crate::ranges::{self, FieldSpec};
use crate::wire::{fx_param_keys, FxParamsDoc};

use super::common::{check_integer, check_number, join, Fields};

const FX_KEYS: &[&str] = &["type", "enabled", "params"];

/// Validates one effect at `path` (`fx_chain[i]`).
pub fn validate_fx(result: &mut ValidationResult, path: &str, value: Value) -> Option<Fx> {
    let mut fields = Fields::open(result, path, value, FX_KEYS)?;
    let fx_type: Option<FxType> = fields.required(result, "type");
    let enabled = fields.optional::<bool>(result, "enabled");
    let params = fields.optional::<FxParamsDoc>(result, "params");

    let fx_type = fx_type?;
    let params = params.ok()?.unwrap_or_default();
    let params_path = fields.child("params");

    let allowed = fx_param_keys(fx_type);
    let mut mismatched = false;
    for key in params.present_keys() {
        if !allowed.contains(&key) {
            mismatched = true;
            result.error(
                ErrorCode::UnionMismatch,
                join(&params_path, key),
                format!("`{}` is not a parameter of `{}`", key, fx_type),
            );
        }
    }

    let kind = build_kind(result, &params_path, fx_type, &params)?;
    if mismatched {
        return None;
    }
    Some(Fx {
        enabled: enabled.ok()?.unwrap_or(true),
        kind,
    })
}

fn float(
    result: &mut ValidationResult,
    params_path: &str,
    field: &FieldSpec,
    value: Option<f64>,
) -> f64 {
    match value {
        Some(v) => {
            check_number(result, field, &join(params_path, field.name()), v);
            v
        }
        None => default_number(field),
    }
}

fn default_number(field: &FieldSpec) -> f64 {
    match field.default {
        Some(ranges::DefaultValue::Number(v)) => v,
        _ => 0.0,
    }
}

fn build_kind(
    result: &mut ValidationResult,
    params_path: &str,
    fx_type: FxType,
    p: &FxParamsDoc,
) -> Option<FxKind> {
    let kind = match fx_type {
        FxType::Softclip => FxKind::Softclip {
            drive: float(result, params_path, &ranges::FX_DRIVE, p.drive),
        },
        FxType::Bitcrush => {
            let steps = match p.steps {
                Some(v) => check_integer(result, &ranges::FX_STEPS, &join(params_path, "steps"), v),
                None => Some(DEFAULT_STEPS),
            };
            let hold_samples = match p.hold_samples {
                Some(v) => check_integer(
                    result,
                    &ranges::FX_HOLD_SAMPLES,
                    &join(params_path, "hold_samples"),
                    v,
                ),
                None => Some(DEFAULT_HOLD_SAMPLES),
            };
            FxKind::Bitcrush {
                steps: steps?,
                hold_samples: hold_samples?,
            }
        }
        FxType::Delay => FxKind::Delay {
            time_ms: float(result, params_path, &ranges::FX_TIME_MS, p.time_ms),
            feedback: float(result, params_path, &ranges::FX_FEEDBACK, p.feedback),
            mix: float(result, params_path, &ranges::FX_MIX, p.mix),
        },
        FxType::Normalize => FxKind::Normalize {
            target_peak: float(result, params_path, &ranges::FX_TARGET_PEAK, p.target_peak),
        },
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn validate(value: Value) -> (Option<Fx>, ValidationResult) {
        let mut result = ValidationResult::success();
        let fx = validate_fx(&mut result, "fx_chain[0]", value);
        (fx, result)
    }

    #[test]
    fn test_defaults_fill_missing_params() {
        let (fx, result) = validate(json!({"type": "delay"}));
        assert!(result.is_ok());
        assert_eq!(fx.unwrap(), Fx::new(FxKind::with_defaults(FxType::Delay)));

        let (fx, _) = validate(json!({"type": "bitcrush", "enabled": false, "params": {"steps": 0}}));
        assert_eq!(
            fx.unwrap(),
            Fx {
                enabled: false,
                kind: FxKind::Bitcrush {
                    steps: 0,
                    hold_samples: DEFAULT_HOLD_SAMPLES,
                },
            }
        );
    }

    #[test]
    fn test_foreign_param_rejected() {
        let (fx, result) = validate(json!({"type": "softclip", "params": {"drive": 2.0, "mix": 0.5}}));
        assert!(fx.is_none());
        assert_eq!(
            result.field_errors(),
            vec![("fx_chain[0].params.mix", "`mix` is not a parameter of `softclip`")]
        );
        assert_eq!(result.errors[0].code, ErrorCode::UnionMismatch);
    }

    #[test]
    fn test_param_ranges() {
        let (_, result) = validate(json!({
            "type": "delay",
            "params": {"time_ms": 500.0, "feedback": 0.9, "mix": 0.2}
        }));
        assert_eq!(
            result.errors.iter().map(|e| e.path.as_str()).collect::<Vec<_>>(),
            vec!["fx_chain[0].params.time_ms", "fx_chain[0].params.feedback"]
        );
    }

    #[test]
    fn test_integer_params() {
        let (fx, result) = validate(json!({"type": "bitcrush", "params": {"hold_samples": 0}}));
        assert!(fx.is_none());
        assert!(result.has_error_at("fx_chain[0].params.hold_samples"));

        let (fx, result) = validate(json!({"type": "bitcrush", "params": {"steps": 4.5}}));
        assert!(fx.is_none());
        assert!(result.has_error_at("fx_chain[0].params"));
        assert_eq!(result.errors[0].code, ErrorCode::MalformedJson);
    }

    #[test]
    fn test_unknown_type() {
        let (fx, result) = validate(json!({"type": "reverb"}));
        assert!(fx.is_none());
        assert!(result.has_error_at("fx_chain[0].type"));
    }
}
