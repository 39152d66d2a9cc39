//! UI parameter bindings.

use serde::{Deserialize, Serialize};

use crate::choice::ParamKind;

/// Default value of a param; the JSON type decides the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamDefault {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Binds a UI control to one leaf of the spec via a path string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Param {
    pub id: String,
    pub label: String,
    pub kind: ParamKind,
    /// Address of the bound leaf, e.g. `layers_by_id.main.osc.freq`.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamDefault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Param {
    /// A slider bound to `path` over `[min, max]`.
    pub fn slider(
        id: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ParamKind::Slider,
            path: path.into(),
            min: Some(min),
            max: Some(max),
            step: None,
            default: None,
            options: None,
        }
    }

    /// Clamps `value` to the binding's own bounds, where declared.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_variants() {
        let p: Param = serde_json::from_value(serde_json::json!({
            "id": "n", "label": "Normalize", "kind": "checkbox",
            "path": "global.normalize", "default": true
        }))
        .unwrap();
        assert_eq!(p.default, Some(ParamDefault::Bool(true)));

        let p: Param = serde_json::from_value(serde_json::json!({
            "id": "f", "label": "Freq", "kind": "slider",
            "path": "layers[0].osc.freq", "default": 440
        }))
        .unwrap();
        assert_eq!(p.default, Some(ParamDefault::Number(440.0)));
    }

    #[test]
    fn test_clamp() {
        let p = Param::slider("f", "Freq", "layers[0].osc.freq", 200.0, 800.0);
        assert_eq!(p.clamp(50.0), 200.0);
        assert_eq!(p.clamp(900.0), 800.0);
        assert_eq!(p.clamp(440.0), 440.0);
    }
}
