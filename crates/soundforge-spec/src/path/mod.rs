//! Parameter path resolver.
//!
//! Reads and writes individual leaves of a [`SoundSpec`] through string
//! addresses:
//!
//! - dot-separated field names: `global.amp`, `duration`
//! - numeric indices into lists: `layers[0].amp`, `layers[0].filter[1].cutoff`
//! - `layers_by_id.<id>.<field>`: linear lookup by layer id
//! - `fx_chain[i]` (alias `fx[i]`) and `fx_by_type.<type>` for effects
//!
//! Writes are type-checked against the leaf and clamped to its range from
//! [`crate::ranges`]. A failed write leaves the spec untouched.
//!
//! ```
//! use soundforge_spec::path::{self, ParamValue};
//! use soundforge_spec::presets;
//!
//! let mut spec = presets::get("gentle_pickup").unwrap();
//! let outcome = path::set(&mut spec, "layers_by_id.main.amp", 3.0).unwrap();
//! assert!(outcome.clamped);
//! assert_eq!(
//!     path::get(&spec, "layers[0].amp").unwrap(),
//!     Some(ParamValue::Number(1.0))
//! );
//! ```

mod navigate;
mod parse;


use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::choice::{FxType, LayerType};
use crate::spec::SoundSpec;

pub use navigate::LeafKind;
pub use parse::{parse_path, Segment};

/// Reasons a path cannot be read or written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("malformed path `{0}`")]
    Malformed(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("`{0}` is a list and needs an index")]
    ExpectedIndex(String),

    #[error("unexpected index [{0}]")]
    UnexpectedIndex(usize),

    #[error("index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("no layer with id `{0}`")]
    LayerNotFound(String),

    #[error("no `{0}` effect in the fx chain")]
    EffectNotFound(FxType),

    #[error("`{block}` does not apply to a `{layer_type}` layer")]
    BlockMismatch { block: String, layer_type: LayerType },

    #[error("`{param}` is not a parameter of `{fx_type}`")]
    FxParamMismatch { param: String, fx_type: FxType },

    #[error("path does not address a leaf value")]
    NotALeaf,

    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{value}` is not one of: {}", options.join(", "))]
    InvalidChoice {
        value: String,
        options: &'static [&'static str],
    },

    #[error("no param with id `{0}`")]
    ParamNotFound(String),
}

/// A value read from or written to a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Interprets a command-line literal: `true`/`false`, a number, or text.
    pub fn parse_literal(s: &str) -> Self {
        match s {
            "true" => ParamValue::Bool(true),
            "false" => ParamValue::Bool(false),
            _ => match s.parse::<f64>() {
                Ok(v) => ParamValue::Number(v),
                Err(_) => ParamValue::Text(s.to_string()),
            },
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Bool(_) => "bool",
            ParamValue::Number(_) => "number",
            ParamValue::Text(_) => "string",
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Number(v) => write!(f, "{}", v),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq)]
pub struct SetOutcome {
    /// The value actually stored.
    pub stored: ParamValue,
    /// True if the input was clamped to the leaf's range.
    pub clamped: bool,
}

impl SetOutcome {
    fn number(raw: f64, stored: f64) -> Self {
        Self {
            stored: ParamValue::Number(stored),
            clamped: raw != stored,
        }
    }
}

/// Reads the leaf at `path`. Unset optional leaves read as `None`; an absent
/// `mod` block reads as its all-zero default.
pub fn get(spec: &SoundSpec, path: &str) -> Result<Option<ParamValue>, PathError> {
    let segments = parse_path(path)?;
    // Navigation hands out mutable leaves, so read from a scratch copy.
    let mut scratch = spec.clone();
    let leaf = navigate::resolve(&mut scratch, &segments)?;
    Ok(leaf.read())
}

/// Kind of the leaf at `path`.
pub fn leaf_kind(spec: &SoundSpec, path: &str) -> Result<LeafKind, PathError> {
    let segments = parse_path(path)?;
    let mut scratch = spec.clone();
    let leaf = navigate::resolve(&mut scratch, &segments)?;
    Ok(leaf.kind())
}

/// Writes `value` to the leaf at `path`, clamping numbers to the leaf's range.
///
/// Atomic: on error `spec` is unchanged.
pub fn set(
    spec: &mut SoundSpec,
    path: &str,
    value: impl Into<ParamValue>,
) -> Result<SetOutcome, PathError> {
    let value = value.into();
    let segments = parse_path(path)?;
    let mut draft = spec.clone();
    let outcome = navigate::resolve(&mut draft, &segments)?.write(&value)?;
    *spec = draft;
    Ok(outcome)
}

/// [`set`] for callers that only need success or failure.
pub fn update(spec: &mut SoundSpec, path: &str, value: impl Into<ParamValue>) -> bool {
    set(spec, path, value).is_ok()
}

/// Writes through the param binding `param_id`, clamping numbers to the
/// binding's own `[min, max]` before the leaf's range.
pub fn set_param(
    spec: &mut SoundSpec,
    param_id: &str,
    value: impl Into<ParamValue>,
) -> Result<SetOutcome, PathError> {
    let param = spec
        .param(param_id)
        .ok_or_else(|| PathError::ParamNotFound(param_id.to_string()))?;
    let path = param.path.clone();

    let (value, pre_clamped) = match value.into() {
        ParamValue::Number(v) if v.is_finite() => {
            let bounded = param.clamp(v);
            (ParamValue::Number(bounded), bounded != v)
        }
        other => (other, false),
    };

    let mut outcome = set(spec, &path, value)?;
    outcome.clamped |= pre_clamped;
    Ok(outcome)
}
