//! SoundSpec validation.
//!
//! Turns untrusted JSON into a typed [`SoundSpec`], collecting every
//! field-level error in document order rather than stopping at the first:
//! root fields, then layers, then the fx chain, then params, then the
//! cross-field checks (id uniqueness, sample ceiling, param bindings).
//!
//! Out-of-range literals are rejected, never clamped. Validation is pure: it
//! performs no I/O and never touches randomness.

mod common;
mod fx;
mod layers;
mod params;

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::spec::{
    sample_count, GlobalSettings, SoundSpec, ALLOWED_SAMPLE_RATES, MAX_SAMPLES, SPEC_VERSION,
};
use crate::ranges;

use common::{check_count, check_identifier, check_integer, check_number, Fields};

const ROOT_KEYS: &[&str] = &[
    "version",
    "name",
    "description",
    "sample_rate",
    "duration",
    "seed",
    "global",
    "layers",
    "fx_chain",
    "params",
];

const GLOBAL_KEYS: &[&str] = &["amp", "normalize"];

/// Parses and validates a JSON string.
pub fn validate_json(json: &str) -> Result<SoundSpec, ValidationResult> {
    let value: Value = serde_json::from_str(json).map_err(|e| {
        ValidationResult::single(ValidationError::new(
            ErrorCode::MalformedJson,
            "",
            format!("invalid JSON: {}", e),
        ))
    })?;
    validate_value(&value)
}

/// Validates a parsed JSON value.
pub fn validate_value(value: &Value) -> Result<SoundSpec, ValidationResult> {
    match inspect_value(value) {
        (Some(spec), _) => Ok(spec),
        (None, result) => Err(result),
    }
}

/// Validates a parsed JSON value, returning warnings alongside the spec.
///
/// The spec is `Some` exactly when the result holds no errors.
pub fn inspect_value(value: &Value) -> (Option<SoundSpec>, ValidationResult) {
    let mut result = ValidationResult::success();
    let spec = build(&mut result, value.clone());
    if result.is_ok() {
        (spec, result)
    } else {
        (None, result)
    }
}

/// Re-checks an already typed spec, e.g. after hand-editing its fields.
pub fn validate_spec(spec: &SoundSpec) -> ValidationResult {
    match spec.to_value() {
        Ok(value) => inspect_value(&value).1,
        Err(e) => ValidationResult::single(ValidationError::new(
            ErrorCode::MalformedJson,
            "",
            e.to_string(),
        )),
    }
}

fn build(result: &mut ValidationResult, value: Value) -> Option<SoundSpec> {
    let mut root = Fields::open(result, "", value, ROOT_KEYS)?;

    let version = root.optional::<String>(result, "version");
    if let Ok(Some(v)) = &version {
        if v != SPEC_VERSION {
            result.error(
                ErrorCode::UnsupportedVersion,
                "version",
                format!("unsupported version `{}`, expected `{}`", v, SPEC_VERSION),
            );
        }
    }

    let name: Option<String> = root.required(result, "name");
    if let Some(name) = &name {
        check_identifier(result, &ranges::NAME, "name", name);
    }

    let description = root.optional::<String>(result, "description");
    if matches!(&description, Ok(d) if d.as_deref().map_or(true, str::is_empty)) {
        result.add_warning(ValidationWarning::new(
            WarningCode::MissingDescription,
            "description",
            "no description given",
        ));
    }

    let sample_rate: Option<i64> = root.required(result, "sample_rate");
    let sample_rate = sample_rate.and_then(|sr| {
        match ALLOWED_SAMPLE_RATES.iter().find(|&&r| i64::from(r) == sr) {
            Some(&rate) => Some(rate),
            None => {
                result.error(
                    ErrorCode::InvalidSampleRate,
                    "sample_rate",
                    format!(
                        "sample_rate must be one of {}, got {}",
                        ranges::SAMPLE_RATE_OPTIONS.join(", "),
                        sr
                    ),
                );
                None
            }
        }
    });

    let duration: Option<f64> = root.required(result, "duration");
    let duration_ok = duration.map_or(false, |d| {
        check_number(result, &ranges::DURATION, "duration", d)
    });

    let seed: Option<i64> = root.required(result, "seed");
    let seed = seed.and_then(|s| check_integer(result, &ranges::SEED, "seed", s));

    let global = root
        .required::<Value>(result, "global")
        .and_then(|v| validate_global(result, v));

    let layers = root.required::<Vec<Value>>(result, "layers").map(|list| {
        check_count(result, &ranges::LAYERS, "layers", list.len());
        collect(list, |i, v| layers::validate_layer(result, &format!("layers[{}]", i), v))
    });

    let fx_chain = root.optional::<Vec<Value>>(result, "fx_chain").map(|list| {
        let list = list.unwrap_or_default();
        check_count(result, &ranges::FX_CHAIN, "fx_chain", list.len());
        collect(list, |i, v| fx::validate_fx(result, &format!("fx_chain[{}]", i), v))
    });

    let params = root.optional::<Vec<Value>>(result, "params").map(|list| {
        let list = list.unwrap_or_default();
        check_count(result, &ranges::PARAMS, "params", list.len());
        collect(list, |i, v| params::validate_param(result, &format!("params[{}]", i), v))
    });

    // Cross-field checks
    if let Some(Some(layers)) = &layers {
        check_unique(result, "layers", layers.iter().map(|l| l.id.as_str()));
    }
    if let Ok(Some(params)) = &params {
        check_unique(result, "params", params.iter().map(|p| p.id.as_str()));
    }
    if let (Some(sr), Some(d), true) = (sample_rate, duration, duration_ok) {
        let n = sample_count(sr, d);
        if n > MAX_SAMPLES {
            result.error(
                ErrorCode::SampleBudgetExceeded,
                "duration",
                format!(
                    "{} Hz x {} s is {} samples, above the ceiling of {}",
                    sr, d, n, MAX_SAMPLES
                ),
            );
        }
    }

    let spec = SoundSpec {
        version: version.ok()?.unwrap_or_else(|| SPEC_VERSION.to_string()),
        name: name?,
        description: description.ok()?.unwrap_or_default(),
        sample_rate: sample_rate?,
        duration: duration?,
        seed: seed?,
        global: global?,
        layers: layers??,
        fx_chain: fx_chain.ok()??,
        params: params.ok()??,
    };
    params::check_bindings(result, &spec);
    Some(spec)
}

fn validate_global(result: &mut ValidationResult, value: Value) -> Option<GlobalSettings> {
    let mut fields = Fields::open(result, "global", value, GLOBAL_KEYS)?;
    let amp: Option<f64> = fields.required(result, "amp");
    if let Some(amp) = amp {
        check_number(result, &ranges::GLOBAL_AMP, "global.amp", amp);
    }
    let normalize = fields.optional::<bool>(result, "normalize");
    Some(GlobalSettings {
        amp: amp?,
        normalize: normalize.ok()?.unwrap_or(false),
    })
}

/// Validates every entry; `None` if any entry failed to assemble.
fn collect<T>(list: Vec<Value>, mut validate: impl FnMut(usize, Value) -> Option<T>) -> Option<Vec<T>> {
    let mut items = Some(Vec::with_capacity(list.len()));
    for (i, value) in list.into_iter().enumerate() {
        match validate(i, value) {
            Some(item) => {
                if let Some(items) = items.as_mut() {
                    items.push(item);
                }
            }
            None => items = None,
        }
    }
    items
}

/// Reports every repeat of an id at the repeat's own path.
fn check_unique<'a>(result: &mut ValidationResult, list: &str, ids: impl Iterator<Item = &'a str>) {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (i, id) in ids.enumerate() {
        if let Some(&first) = first_seen.get(id) {
            result.error(
                ErrorCode::DuplicateId,
                format!("{}[{}].id", list, i),
                format!("duplicate id `{}` (first used at {}[{}])", id, list, first),
            );
        } else {
            first_seen.insert(id, i);
        }
    }
}

#[cfg(test)]
mod tests;
