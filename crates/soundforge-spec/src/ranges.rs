//! Field range table.
//!
//! One [`FieldSpec`] per addressable field. The validator rejects literals
//! outside these bounds, the path resolver clamps writes into them, and the
//! schema export publishes them. Keep all three in sync by only ever reading
//! limits from here.

use serde::Serialize;

use crate::choice::{
    Choice, Curve, EnvelopeShape, FilterType, FmWaveform, FxType, ImpulseKind, LayerType,
    NoiseColor, ParamKind, Waveform,
};
use crate::fx;
use crate::layer;
use crate::spec::{MAX_SEED, SPEC_VERSION};

/// Value kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "options")]
pub enum FieldKind {
    Float,
    Integer,
    Bool,
    Text,
    Choice(&'static [&'static str]),
    /// An ordered sequence; `min`/`max` bound its length.
    List,
}

/// Default value advertised in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Number(f64),
    Bool(bool),
    Text(&'static str),
}

/// Declared shape of one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Schema path, with `[]` standing for any index.
    pub path: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    pub required: bool,
    pub doc: &'static str,
}

impl FieldSpec {
    /// Last path segment, used in messages.
    pub fn name(&self) -> &'static str {
        let tail = self.path.rsplit('.').next().unwrap_or(self.path);
        tail.trim_end_matches("[]")
    }

    /// Returns true if `value` lies within the declared bounds.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Clamps `value` into the declared bounds.
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

    /// `"[min, max]"` for messages.
    pub fn bounds(&self) -> String {
        let fmt = |b: Option<f64>| b.map_or_else(|| "-".to_string(), |v| v.to_string());
        format!("[{}, {}]", fmt(self.min), fmt(self.max))
    }
}

const fn float(
    path: &'static str,
    min: f64,
    max: f64,
    default: Option<f64>,
    doc: &'static str,
) -> FieldSpec {
    FieldSpec {
        path,
        kind: FieldKind::Float,
        min: Some(min),
        max: Some(max),
        default: match default {
            Some(v) => Some(DefaultValue::Number(v)),
            None => None,
        },
        required: default.is_none(),
        doc,
    }
}

/// An optional float with no default.
const fn optional(path: &'static str, min: f64, max: f64, doc: &'static str) -> FieldSpec {
    FieldSpec {
        path,
        kind: FieldKind::Float,
        min: Some(min),
        max: Some(max),
        default: None,
        required: false,
        doc,
    }
}

const fn integer(
    path: &'static str,
    min: f64,
    max: f64,
    default: Option<f64>,
    doc: &'static str,
) -> FieldSpec {
    FieldSpec {
        path,
        kind: FieldKind::Integer,
        min: Some(min),
        max: Some(max),
        default: match default {
            Some(v) => Some(DefaultValue::Number(v)),
            None => None,
        },
        required: default.is_none(),
        doc,
    }
}

const fn choice(
    path: &'static str,
    options: &'static [&'static str],
    default: Option<&'static str>,
    doc: &'static str,
) -> FieldSpec {
    FieldSpec {
        path,
        kind: FieldKind::Choice(options),
        min: None,
        max: None,
        default: match default {
            Some(v) => Some(DefaultValue::Text(v)),
            None => None,
        },
        required: default.is_none(),
        doc,
    }
}

const fn list(path: &'static str, min: f64, max: f64, required: bool, doc: &'static str) -> FieldSpec {
    FieldSpec {
        path,
        kind: FieldKind::List,
        min: Some(min),
        max: Some(max),
        default: None,
        required,
        doc,
    }
}

const fn text(path: &'static str, required: bool, doc: &'static str) -> FieldSpec {
    FieldSpec {
        path,
        kind: FieldKind::Text,
        min: None,
        max: None,
        default: None,
        required,
        doc,
    }
}

const fn boolean(path: &'static str, default: Option<bool>, doc: &'static str) -> FieldSpec {
    FieldSpec {
        path,
        kind: FieldKind::Bool,
        min: None,
        max: None,
        default: match default {
            Some(v) => Some(DefaultValue::Bool(v)),
            None => None,
        },
        required: default.is_none(),
        doc,
    }
}

pub const SAMPLE_RATE_OPTIONS: &[&str] = &["22050", "44100", "48000"];

// Root
pub const VERSION: FieldSpec = choice("version", &[SPEC_VERSION], Some(SPEC_VERSION), "format version");
pub const NAME: FieldSpec = text("name", true, "short identifier for the sound");
pub const DESCRIPTION: FieldSpec = text("description", false, "free-form description");
pub const SAMPLE_RATE: FieldSpec = choice("sample_rate", SAMPLE_RATE_OPTIONS, None, "output sample rate in Hz");
pub const DURATION: FieldSpec = float("duration", 0.01, 3.0, None, "length in seconds");
pub const SEED: FieldSpec = integer("seed", 0.0, MAX_SEED as f64, None, "seed of the single random stream");
pub const GLOBAL_AMP: FieldSpec = float("global.amp", 0.0, 1.0, None, "gain applied to the layer sum");
pub const GLOBAL_NORMALIZE: FieldSpec = boolean("global.normalize", Some(false), "normalize the output peak to 0.95");

// Layers
pub const LAYERS: FieldSpec = list("layers", 1.0, 16.0, true, "sound-generating voices");
pub const LAYER_ID: FieldSpec = text("layers[].id", true, "unique layer id");
pub const LAYER_TYPE: FieldSpec = choice("layers[].type", LayerType::NAMES, None, "selects the parameter block");
pub const LAYER_AMP: FieldSpec = float("layers[].amp", 0.0, 1.0, None, "layer gain");
pub const LAYER_PAN: FieldSpec = float("layers[].pan", -1.0, 1.0, Some(0.0), "stereo position, equal-power law");
pub const LAYER_PHASE: FieldSpec = float("layers[].phase", 0.0, std::f64::consts::TAU, Some(0.0), "initial phase in radians");

pub const ENV_ATTACK: FieldSpec = float("layers[].env.attack", 0.0, 0.2, None, "attack time in seconds");
pub const ENV_DECAY: FieldSpec = float("layers[].env.decay", 0.001, 2.0, None, "decay time in seconds");
pub const ENV_SUSTAIN: FieldSpec = optional("layers[].env.sustain", 0.0, 1.0, "sustain level (adsr, default 0.5)");
pub const ENV_RELEASE: FieldSpec = optional("layers[].env.release", 0.0, 2.0, "release time (adsr, default 0.1)");
pub const ENV_SHAPE: FieldSpec = choice("layers[].env.shape", EnvelopeShape::NAMES, Some("exp"), "envelope shape");

pub const MOD_TREMOLO_HZ: FieldSpec = float("layers[].mod.tremolo_hz", 0.0, 30.0, Some(0.0), "tremolo rate");
pub const MOD_TREMOLO_DEPTH: FieldSpec = float("layers[].mod.tremolo_depth", 0.0, 0.8, Some(0.0), "tremolo depth");
pub const MOD_PITCH_LFO_HZ: FieldSpec = float("layers[].mod.pitch_lfo_hz", 0.0, 30.0, Some(0.0), "pitch LFO rate");
pub const MOD_PITCH_LFO_DEPTH: FieldSpec = float("layers[].mod.pitch_lfo_depth", 0.0, 0.1, Some(0.0), "pitch LFO depth (ratio)");

pub const FILTERS: FieldSpec = list("layers[].filter", 0.0, 4.0, false, "filter chain, applied in order");
pub const FILTER_TYPE: FieldSpec = choice("layers[].filter[].type", FilterType::NAMES, None, "filter response");
pub const FILTER_CUTOFF: FieldSpec = float("layers[].filter[].cutoff", 20.0, 20000.0, None, "cutoff (sweep start) in Hz");
pub const FILTER_CUTOFF_END: FieldSpec = optional("layers[].filter[].cutoff_end", 20.0, 20000.0, "sweep target in Hz");
pub const FILTER_Q: FieldSpec = float("layers[].filter[].q", 0.1, 10.0, Some(layer::DEFAULT_Q), "resonance (biquad only)");
pub const FILTER_CURVE: FieldSpec = choice("layers[].filter[].curve", Curve::NAMES, Some("linear"), "sweep curve");

pub const OSC_WAVEFORM: FieldSpec = choice("layers[].osc.waveform", Waveform::NAMES, None, "oscillator waveform");
pub const OSC_FREQ: FieldSpec = float("layers[].osc.freq", 20.0, 20000.0, None, "frequency in Hz");
pub const OSC_DETUNE: FieldSpec = float("layers[].osc.detune", -50.0, 50.0, Some(0.0), "detune in cents");
pub const OSC_HARMONICS: FieldSpec = list("layers[].osc.harmonics", 0.0, 8.0, false, "harmonic series");
pub const OSC_HARMONIC_MUL: FieldSpec = float("layers[].osc.harmonics[].mul", 1.0, 10.0, None, "frequency multiplier");
pub const OSC_HARMONIC_AMP: FieldSpec = float("layers[].osc.harmonics[].amp", 0.0, 1.0, None, "relative amplitude");

pub const CHIRP_WAVEFORM: FieldSpec = choice("layers[].chirp.waveform", Waveform::NAMES, None, "oscillator waveform");
pub const CHIRP_F_START: FieldSpec = float("layers[].chirp.f_start", 20.0, 20000.0, None, "start frequency in Hz");
pub const CHIRP_F_END: FieldSpec = float("layers[].chirp.f_end", 20.0, 20000.0, None, "end frequency in Hz");
pub const CHIRP_CURVE: FieldSpec = choice("layers[].chirp.curve", Curve::NAMES, Some("exponential"), "glide curve");
pub const CHIRP_VIBRATO_HZ: FieldSpec = float("layers[].chirp.vibrato_hz", 0.0, 40.0, Some(0.0), "vibrato rate");
pub const CHIRP_VIBRATO_DEPTH: FieldSpec = float("layers[].chirp.vibrato_depth", 0.0, 0.1, Some(0.0), "vibrato depth (ratio)");
pub const CHIRP_HARMONICS: FieldSpec = list("layers[].chirp.harmonics", 0.0, 8.0, false, "harmonic series");
pub const CHIRP_HARMONIC_MUL: FieldSpec = float("layers[].chirp.harmonics[].mul", 1.0, 10.0, None, "frequency multiplier");
pub const CHIRP_HARMONIC_AMP: FieldSpec = float("layers[].chirp.harmonics[].amp", 0.0, 1.0, None, "relative amplitude");

pub const FM_CARRIER_FREQ: FieldSpec = float("layers[].fm.carrier_freq", 20.0, 20000.0, None, "carrier frequency in Hz");
pub const FM_MOD_FREQ: FieldSpec = float("layers[].fm.mod_freq", 1.0, 20000.0, None, "modulator frequency in Hz");
pub const FM_INDEX: FieldSpec = float("layers[].fm.index", 0.0, 20.0, None, "modulation index");
pub const FM_WAVEFORM: FieldSpec = choice("layers[].fm.waveform", FmWaveform::NAMES, Some("sine"), "operator waveform");
pub const FM_BRIGHTNESS: FieldSpec = float("layers[].fm.brightness", 0.0, 1.0, Some(layer::DEFAULT_BRIGHTNESS), "scales the index by 0.5 + brightness");

pub const NOISE_COLOR: FieldSpec = choice("layers[].noise.color", NoiseColor::NAMES, None, "noise color");
pub const NOISE_CUTOFF_START: FieldSpec = optional("layers[].noise.cutoff_start", 50.0, 20000.0, "low-pass sweep start in Hz");
pub const NOISE_CUTOFF_END: FieldSpec = optional("layers[].noise.cutoff_end", 50.0, 20000.0, "low-pass sweep end in Hz");
pub const NOISE_CUTOFF_CURVE: FieldSpec = choice("layers[].noise.cutoff_curve", Curve::NAMES, Some("linear"), "sweep curve");

pub const IMPULSE_KIND: FieldSpec = choice("layers[].impulse.kind", ImpulseKind::NAMES, None, "impulse flavour");
pub const IMPULSE_WIDTH: FieldSpec = float("layers[].impulse.width", 0.0002, 0.02, None, "pulse width in seconds");
pub const IMPULSE_TONE_FREQ: FieldSpec = optional("layers[].impulse.tone_freq", 20.0, 20000.0, "metal_ping tone (default 2000)");

// Effects
pub const FX_CHAIN: FieldSpec = list("fx_chain", 0.0, 8.0, false, "post-mix effects, applied in order");
pub const FX_TYPE: FieldSpec = choice("fx_chain[].type", FxType::NAMES, None, "effect type");
pub const FX_ENABLED: FieldSpec = boolean("fx_chain[].enabled", Some(true), "skip the effect when false");
pub const FX_DRIVE: FieldSpec = float("fx_chain[].params.drive", 0.0, 4.0, Some(fx::DEFAULT_DRIVE), "softclip input gain");
pub const FX_STEPS: FieldSpec = integer("fx_chain[].params.steps", 0.0, 1024.0, Some(fx::DEFAULT_STEPS as f64), "bitcrush levels per unit (0 = off)");
pub const FX_HOLD_SAMPLES: FieldSpec = integer("fx_chain[].params.hold_samples", 1.0, 64.0, Some(fx::DEFAULT_HOLD_SAMPLES as f64), "bitcrush sample-and-hold length");
pub const FX_TIME_MS: FieldSpec = float("fx_chain[].params.time_ms", 5.0, 200.0, Some(fx::DEFAULT_TIME_MS), "delay time in milliseconds");
pub const FX_FEEDBACK: FieldSpec = float("fx_chain[].params.feedback", 0.0, 0.85, Some(fx::DEFAULT_FEEDBACK), "delay feedback gain");
pub const FX_MIX: FieldSpec = float("fx_chain[].params.mix", 0.0, 0.7, Some(fx::DEFAULT_MIX), "delay wet level");
pub const FX_TARGET_PEAK: FieldSpec = float("fx_chain[].params.target_peak", 0.1, 0.99, Some(fx::DEFAULT_TARGET_PEAK), "normalize peak");

// Params
pub const PARAMS: FieldSpec = list("params", 0.0, 24.0, false, "UI parameter bindings");
pub const PARAM_ID: FieldSpec = text("params[].id", true, "unique param id");
pub const PARAM_LABEL: FieldSpec = text("params[].label", true, "display label");
pub const PARAM_KIND: FieldSpec = choice("params[].kind", ParamKind::NAMES, None, "UI control");
pub const PARAM_PATH: FieldSpec = text("params[].path", true, "address of the bound field");

/// Every field, in document order.
pub static FIELDS: &[&FieldSpec] = &[
    &VERSION,
    &NAME,
    &DESCRIPTION,
    &SAMPLE_RATE,
    &DURATION,
    &SEED,
    &GLOBAL_AMP,
    &GLOBAL_NORMALIZE,
    &LAYERS,
    &LAYER_ID,
    &LAYER_TYPE,
    &LAYER_AMP,
    &LAYER_PAN,
    &LAYER_PHASE,
    &ENV_ATTACK,
    &ENV_DECAY,
    &ENV_SUSTAIN,
    &ENV_RELEASE,
    &ENV_SHAPE,
    &MOD_TREMOLO_HZ,
    &MOD_TREMOLO_DEPTH,
    &MOD_PITCH_LFO_HZ,
    &MOD_PITCH_LFO_DEPTH,
    &FILTERS,
    &FILTER_TYPE,
    &FILTER_CUTOFF,
    &FILTER_CUTOFF_END,
    &FILTER_Q,
    &FILTER_CURVE,
    &OSC_WAVEFORM,
    &OSC_FREQ,
    &OSC_DETUNE,
    &OSC_HARMONICS,
    &OSC_HARMONIC_MUL,
    &OSC_HARMONIC_AMP,
    &CHIRP_WAVEFORM,
    &CHIRP_F_START,
    &CHIRP_F_END,
    &CHIRP_CURVE,
    &CHIRP_VIBRATO_HZ,
    &CHIRP_VIBRATO_DEPTH,
    &CHIRP_HARMONICS,
    &CHIRP_HARMONIC_MUL,
    &CHIRP_HARMONIC_AMP,
    &FM_CARRIER_FREQ,
    &FM_MOD_FREQ,
    &FM_INDEX,
    &FM_WAVEFORM,
    &FM_BRIGHTNESS,
    &NOISE_COLOR,
    &NOISE_CUTOFF_START,
    &NOISE_CUTOFF_END,
    &NOISE_CUTOFF_CURVE,
    &IMPULSE_KIND,
    &IMPULSE_WIDTH,
    &IMPULSE_TONE_FREQ,
    &FX_CHAIN,
    &FX_TYPE,
    &FX_ENABLED,
    &FX_DRIVE,
    &FX_STEPS,
    &FX_HOLD_SAMPLES,
    &FX_TIME_MS,
    &FX_FEEDBACK,
    &FX_MIX,
    &FX_TARGET_PEAK,
    &PARAMS,
    &PARAM_ID,
    &PARAM_LABEL,
    &PARAM_KIND,
    &PARAM_PATH,
];

/// Looks up a field by its schema path (`layers[].osc.freq`).
pub fn field(path: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().copied().find(|f| f.path == path)
}
