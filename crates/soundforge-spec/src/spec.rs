//! The SoundSpec root type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SpecError;
use crate::fx::Fx;
use crate::layer::Layer;
use crate::param::Param;

/// Current SoundSpec format version.
pub const SPEC_VERSION: &str = "soundspec-1";

/// Maximum allowed seed value.
pub const MAX_SEED: u32 = 2_147_483_647;

/// Hard ceiling on `round(sample_rate * duration)`.
pub const MAX_SAMPLES: usize = 144_000;

/// Sample rates a spec may declare.
pub const ALLOWED_SAMPLE_RATES: [u32; 3] = [22050, 44100, 48000];

/// Peak level reached by global normalization.
pub const NORMALIZE_CEILING: f64 = 0.95;

/// Number of samples rendered for a sample rate and duration.
pub fn sample_count(sample_rate: u32, duration: f64) -> usize {
    (f64::from(sample_rate) * duration).round() as usize
}

/// Output-stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalSettings {
    /// Gain applied to the layer sum.
    pub amp: f64,
    /// Normalize the final buffer to [`NORMALIZE_CEILING`].
    #[serde(default)]
    pub normalize: bool,
}

/// A validated, declarative description of one sound.
///
/// Obtain one from [`SoundSpec::from_json`] / [`SoundSpec::from_value`] (or
/// the functions in [`crate::validation`]); every invariant has been checked
/// by then.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundSpec {
    pub version: String,
    pub name: String,
    pub description: String,
    pub sample_rate: u32,
    /// Duration in seconds.
    pub duration: f64,
    pub seed: u32,
    #[serde(rename = "global")]
    pub global: GlobalSettings,
    pub layers: Vec<Layer>,
    pub fx_chain: Vec<Fx>,
    pub params: Vec<Param>,
}

impl SoundSpec {
    /// Parses and validates a SoundSpec from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        crate::validation::validate_json(json).map_err(SpecError::ValidationFailed)
    }

    /// Validates a SoundSpec from a parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, SpecError> {
        crate::validation::validate_value(value).map_err(SpecError::ValidationFailed)
    }

    /// Serializes to compact JSON.
    pub fn to_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts to a JSON value.
    pub fn to_value(&self) -> Result<Value, SpecError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Length of the rendered buffer.
    pub fn num_samples(&self) -> usize {
        sample_count(self.sample_rate, self.duration)
    }

    /// Looks up a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Looks up a param binding by id.
    pub fn param(&self, id: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.id == id)
    }
}
