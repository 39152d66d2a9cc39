//! Shared range and shape checks.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ErrorCode, ValidationResult};
use crate::ranges::{FieldKind, FieldSpec};

/// Marker for a field whose error has already been reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reported;

/// Reads the keys of one JSON object, reporting each failure at the key's
/// own path.
pub struct Fields {
    map: Map<String, Value>,
    path: String,
}

impl Fields {
    /// Opens `value` as an object and reports keys outside `allowed`.
    pub fn open(
        result: &mut ValidationResult,
        path: &str,
        value: Value,
        allowed: &[&str],
    ) -> Option<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                result.error(
                    ErrorCode::MalformedJson,
                    path,
                    format!("expected an object, got {}", json_type(&other)),
                );
                return None;
            }
        };
        for key in map.keys() {
            if !allowed.contains(&key.as_str()) {
                result.error(
                    ErrorCode::MalformedJson,
                    join(path, key),
                    format!("unknown field `{}`", key),
                );
            }
        }
        Some(Self {
            map,
            path: path.to_string(),
        })
    }

    /// Path of a child key.
    pub fn child(&self, key: &str) -> String {
        join(&self.path, key)
    }

    /// Decodes a required key.
    pub fn required<T: DeserializeOwned>(
        &mut self,
        result: &mut ValidationResult,
        key: &str,
    ) -> Option<T> {
        match self.optional(result, key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                result.error(
                    ErrorCode::MalformedJson,
                    self.child(key),
                    format!("missing field `{}`", key),
                );
                None
            }
            Err(Reported) => None,
        }
    }

    /// Decodes an optional key; `Ok(None)` when absent or null.
    pub fn optional<T: DeserializeOwned>(
        &mut self,
        result: &mut ValidationResult,
        key: &str,
    ) -> Result<Option<T>, Reported> {
        match self.map.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(result, &self.child(key), value).map(Some),
        }
    }
}

/// Deserializes `value`, reporting a failure at `path`.
pub fn decode<T: DeserializeOwned>(
    result: &mut ValidationResult,
    path: &str,
    value: Value,
) -> Result<T, Reported> {
    serde_json::from_value(value).map_err(|e| {
        result.error(ErrorCode::MalformedJson, path, e.to_string());
        Reported
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Checks a number against its field's range. Returns true if valid.
pub fn check_number(result: &mut ValidationResult, field: &FieldSpec, path: &str, value: f64) -> bool {
    if !value.is_finite() {
        result.error(
            ErrorCode::NonFiniteNumber,
            path,
            format!("{} must be a finite number, got {}", field.name(), value),
        );
        return false;
    }
    if !field.contains(value) {
        result.error(
            ErrorCode::OutOfRange,
            path,
            format!("{} must be in {}, got {}", field.name(), field.bounds(), value),
        );
        return false;
    }
    true
}

/// Checks an optional number; `None` is always valid.
pub fn check_optional(
    result: &mut ValidationResult,
    field: &FieldSpec,
    path: &str,
    value: Option<f64>,
) -> bool {
    match value {
        Some(v) => check_number(result, field, path, v),
        None => true,
    }
}

/// Checks an integer field and converts it on success.
pub fn check_integer(
    result: &mut ValidationResult,
    field: &FieldSpec,
    path: &str,
    value: i64,
) -> Option<u32> {
    debug_assert_eq!(field.kind, FieldKind::Integer);
    if check_number(result, field, path, value as f64) {
        u32::try_from(value).ok()
    } else {
        None
    }
}

/// Checks a list length against the field's bounds.
pub fn check_count(result: &mut ValidationResult, field: &FieldSpec, path: &str, len: usize) -> bool {
    if field.contains(len as f64) {
        return true;
    }
    let (min, max) = (field.min.unwrap_or(0.0), field.max.unwrap_or(f64::INFINITY));
    let message = if (len as f64) < min {
        format!("{} needs at least {} entries, got {}", field.name(), min, len)
    } else {
        format!("{} allows at most {} entries, got {}", field.name(), max, len)
    };
    result.error(ErrorCode::ListLength, path, message);
    false
}

/// Rejects empty or whitespace-only identifiers.
pub fn check_identifier(result: &mut ValidationResult, field: &FieldSpec, path: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        result.error(
            ErrorCode::EmptyIdentifier,
            path,
            format!("{} must not be empty", field.name()),
        );
        return false;
    }
    true
}

/// Joins a parent path and a child field name.
pub fn join(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}.{}", parent, child)
    }
}
