//! Wire documents: the permissive JSON shapes the validator reads.
//!
//! The typed model in [`crate::layer`] and [`crate::fx`] cannot represent a
//! layer whose parameter block disagrees with its `type`. These documents can,
//! so the validator deserializes into them first and then converts with an
//! exhaustive match. Typed values serialize back through the same documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::choice::{FxType, LayerType};
use crate::fx::{Fx, FxKind};
use crate::layer::{
    ChirpParams, Envelope, Filter, FmParams, ImpulseParams, Layer, LayerKind, Modulation,
    NoiseParams, OscParams,
};
use crate::spec::SPEC_VERSION;

fn default_version() -> String {
    SPEC_VERSION.to_string()
}

fn default_true() -> bool {
    true
}

/// Root document. Nested collections stay as raw JSON so that a bad entry is
/// reported at its own path instead of failing the whole document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundSpecDoc {
    #[serde(default = "default_version")]
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sample_rate: i64,
    pub duration: f64,
    pub seed: i64,
    pub global: Value,
    pub layers: Vec<Value>,
    #[serde(default)]
    pub fx_chain: Vec<Value>,
    #[serde(default)]
    pub params: Vec<Value>,
}

/// Layer as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerDoc {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub amp: f64,
    #[serde(default)]
    pub pan: f64,
    #[serde(default)]
    pub phase: f64,
    pub env: Envelope,
    #[serde(default, rename = "mod", skip_serializing_if = "Option::is_none")]
    pub modulation: Option<Modulation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<Filter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osc: Option<OscParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chirp: Option<ChirpParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fm: Option<FmParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impulse: Option<ImpulseParams>,
}

impl LayerDoc {
    /// Types whose parameter block is present, in declaration order.
    pub fn populated_blocks(&self) -> Vec<LayerType> {
        let mut blocks = Vec::new();
        if self.osc.is_some() {
            blocks.push(LayerType::Osc);
        }
        if self.chirp.is_some() {
            blocks.push(LayerType::Chirp);
        }
        if self.fm.is_some() {
            blocks.push(LayerType::Fm);
        }
        if self.noise.is_some() {
            blocks.push(LayerType::Noise);
        }
        if self.impulse.is_some() {
            blocks.push(LayerType::Impulse);
        }
        blocks
    }

    /// Takes the block matching `layer_type`, if present.
    pub fn take_kind(&mut self) -> Option<LayerKind> {
        match self.layer_type {
            LayerType::Osc => self.osc.take().map(LayerKind::Osc),
            LayerType::Chirp => self.chirp.take().map(LayerKind::Chirp),
            LayerType::Fm => self.fm.take().map(LayerKind::Fm),
            LayerType::Noise => self.noise.take().map(LayerKind::Noise),
            LayerType::Impulse => self.impulse.take().map(LayerKind::Impulse),
        }
    }
}

impl From<Layer> for LayerDoc {
    fn from(layer: Layer) -> Self {
        let mut doc = LayerDoc {
            id: layer.id,
            layer_type: layer.kind.layer_type(),
            amp: layer.amp,
            pan: layer.pan,
            phase: layer.phase,
            env: layer.env,
            modulation: layer.modulation,
            filter: if layer.filters.is_empty() {
                None
            } else {
                Some(layer.filters)
            },
            osc: None,
            chirp: None,
            fm: None,
            noise: None,
            impulse: None,
        };
        match layer.kind {
            LayerKind::Osc(p) => doc.osc = Some(p),
            LayerKind::Chirp(p) => doc.chirp = Some(p),
            LayerKind::Fm(p) => doc.fm = Some(p),
            LayerKind::Noise(p) => doc.noise = Some(p),
            LayerKind::Impulse(p) => doc.impulse = Some(p),
        }
        doc
    }
}

/// Effect as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FxDoc {
    #[serde(rename = "type")]
    pub fx_type: FxType,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub params: FxParamsDoc,
}

/// Union of every effect parameter; which keys are legal depends on the type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FxParamsDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_samples: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_peak: Option<f64>,
}

impl FxParamsDoc {
    /// Names of the keys that are present, in declaration order.
    pub fn present_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.drive.is_some() {
            keys.push("drive");
        }
        if self.steps.is_some() {
            keys.push("steps");
        }
        if self.hold_samples.is_some() {
            keys.push("hold_samples");
        }
        if self.time_ms.is_some() {
            keys.push("time_ms");
        }
        if self.feedback.is_some() {
            keys.push("feedback");
        }
        if self.mix.is_some() {
            keys.push("mix");
        }
        if self.target_peak.is_some() {
            keys.push("target_peak");
        }
        keys
    }
}

/// Parameter keys that belong to each effect type.
pub fn fx_param_keys(fx_type: FxType) -> &'static [&'static str] {
    match fx_type {
        FxType::Softclip => &["drive"],
        FxType::Bitcrush => &["steps", "hold_samples"],
        FxType::Delay => &["time_ms", "feedback", "mix"],
        FxType::Normalize => &["target_peak"],
    }
}

impl From<Fx> for FxDoc {
    fn from(fx: Fx) -> Self {
        let fx_type = fx.kind.fx_type();
        let mut params = FxParamsDoc::default();
        match fx.kind {
            FxKind::Softclip { drive } => params.drive = Some(drive),
            FxKind::Bitcrush {
                steps,
                hold_samples,
            } => {
                params.steps = Some(i64::from(steps));
                params.hold_samples = Some(i64::from(hold_samples));
            }
            FxKind::Delay {
                time_ms,
                feedback,
                mix,
            } => {
                params.time_ms = Some(time_ms);
                params.feedback = Some(feedback);
                params.mix = Some(mix);
            }
            FxKind::Normalize { target_peak } => params.target_peak = Some(target_peak),
        }
        FxDoc {
            fx_type,
            enabled: fx.enabled,
            params,
        }
    }
}
