//! Param binding validation.
//!
//! Structural checks run per entry; binding checks need the assembled spec
//! and run after everything else.

use serde_json::Value;

use crate::choice::ParamKind;
use crate::error::{ErrorCode, ValidationResult, ValidationWarning, WarningCode};
use crate::param::{Param, ParamDefault};
use crate::path::{self, LeafKind, ParamValue};
use crate::ranges;
use crate::spec::SoundSpec;

use super::common::{check_identifier, join, Fields};

const PARAM_KEYS: &[&str] = &[
    "id", "label", "kind", "path", "min", "max", "step", "default", "options",
];

/// Validates the shape of one param at `path` (`params[i]`).
pub fn validate_param(result: &mut ValidationResult, path: &str, value: Value) -> Option<Param> {
    let mut fields = Fields::open(result, path, value, PARAM_KEYS)?;

    let id: Option<String> = fields.required(result, "id");
    if let Some(id) = &id {
        check_identifier(result, &ranges::PARAM_ID, &fields.child("id"), id);
    }
    let label: Option<String> = fields.required(result, "label");
    let kind: Option<ParamKind> = fields.required(result, "kind");
    let bound: Option<String> = fields.required(result, "path");
    if let Some(bound) = &bound {
        check_identifier(result, &ranges::PARAM_PATH, &fields.child("path"), bound);
    }
    let min = fields.optional::<f64>(result, "min");
    let max = fields.optional::<f64>(result, "max");
    let step = fields.optional::<f64>(result, "step");
    let default = fields.optional::<ParamDefault>(result, "default");
    let options = fields.optional::<Vec<String>>(result, "options");

    let param = Param {
        id: id?,
        label: label?,
        kind: kind?,
        path: bound?,
        min: min.ok()?,
        max: max.ok()?,
        step: step.ok()?,
        default: default.ok()?,
        options: options.ok()?,
    };
    check_binding_shape(result, path, &param);
    Some(param)
}

fn check_binding_shape(result: &mut ValidationResult, path: &str, p: &Param) {
    for (name, value) in [("min", p.min), ("max", p.max), ("step", p.step)] {
        if let Some(v) = value {
            if !v.is_finite() {
                result.error(
                    ErrorCode::NonFiniteNumber,
                    join(path, name),
                    format!("{} must be a finite number", name),
                );
            }
        }
    }
    if let (Some(min), Some(max)) = (p.min, p.max) {
        if min > max {
            result.error(
                ErrorCode::InvalidParamBinding,
                path,
                format!("min ({}) must not exceed max ({})", min, max),
            );
        }
    }
    if let Some(step) = p.step {
        if step <= 0.0 {
            result.error(
                ErrorCode::InvalidParamBinding,
                join(path, "step"),
                format!("step must be positive, got {}", step),
            );
        }
    }

    match (p.kind, &p.options) {
        (ParamKind::Select, None) => result.error(
            ErrorCode::InvalidParamBinding,
            join(path, "options"),
            "select params need options",
        ),
        (ParamKind::Select, Some(options)) if options.is_empty() => result.error(
            ErrorCode::InvalidParamBinding,
            join(path, "options"),
            "select params need at least one option",
        ),
        (ParamKind::Select, Some(_)) | (_, None) => {}
        (_, Some(_)) => result.add_warning(ValidationWarning::new(
            WarningCode::IgnoredField,
            join(path, "options"),
            "options only apply to select params",
        )),
    }

    let default_ok = match (&p.default, p.kind) {
        (None, _) => true,
        (Some(ParamDefault::Number(_)), ParamKind::Slider) => true,
        (Some(ParamDefault::Bool(_)), ParamKind::Checkbox) => true,
        (Some(ParamDefault::Text(_)), ParamKind::Select) => true,
        _ => false,
    };
    if !default_ok {
        result.error(
            ErrorCode::InvalidParamBinding,
            join(path, "default"),
            format!("default does not fit a {} param", p.kind),
        );
    }
}

/// Checks that each param's path resolves against `spec` and that the leaf
/// it reaches suits the control kind.
pub fn check_bindings(result: &mut ValidationResult, spec: &SoundSpec) {
    for (i, p) in spec.params.iter().enumerate() {
        let item = format!("params[{}]", i);
        let leaf = match path::leaf_kind(spec, &p.path) {
            Ok(leaf) => leaf,
            Err(e) => {
                result.error(
                    ErrorCode::UnresolvablePath,
                    join(&item, "path"),
                    format!("`{}` does not resolve: {}", p.path, e),
                );
                continue;
            }
        };

        let fits = match p.kind {
            ParamKind::Slider => matches!(leaf, LeafKind::Number | LeafKind::Integer),
            ParamKind::Checkbox => leaf == LeafKind::Bool,
            ParamKind::Select => leaf == LeafKind::Choice,
        };
        if !fits {
            result.error(
                ErrorCode::InvalidParamBinding,
                join(&item, "kind"),
                format!("a {} cannot drive `{}` ({:?} leaf)", p.kind, p.path, leaf),
            );
            continue;
        }

        if let (ParamKind::Select, Some(options)) = (p.kind, &p.options) {
            for (k, option) in options.iter().enumerate() {
                let mut scratch = spec.clone();
                if let Err(e) = path::set(&mut scratch, &p.path, ParamValue::Text(option.clone())) {
                    result.error(
                        ErrorCode::InvalidParamBinding,
                        format!("{}.options[{}]", item, k),
                        e.to_string(),
                    );
                }
            }
        }
    }
}
