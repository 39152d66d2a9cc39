//! Layer types: the sound-generating voices of a SoundSpec.

use serde::{Deserialize, Serialize};

use crate::choice::{
    Curve, EnvelopeShape, FilterType, FmWaveform, ImpulseKind, LayerType, NoiseColor, Waveform,
};
use crate::wire::LayerDoc;

/// Sustain level used by ADSR envelopes that omit `sustain`.
pub const DEFAULT_SUSTAIN: f64 = 0.5;
/// Release time (seconds) used by ADSR envelopes that omit `release`.
pub const DEFAULT_RELEASE: f64 = 0.1;
/// Default biquad Q (Butterworth).
pub const DEFAULT_Q: f64 = 0.707;
/// Default FM brightness; maps to the nominal modulation index.
pub const DEFAULT_BRIGHTNESS: f64 = 0.5;
/// Tone used by `metal_ping` impulses without `tone_freq`.
pub const DEFAULT_TONE_FREQ: f64 = 2000.0;

fn default_q() -> f64 {
    DEFAULT_Q
}

fn default_brightness() -> f64 {
    DEFAULT_BRIGHTNESS
}

fn default_chirp_curve() -> Curve {
    Curve::Exponential
}

/// One partial of a harmonic series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Harmonic {
    /// Frequency multiplier relative to the fundamental.
    pub mul: f64,
    /// Amplitude relative to the fundamental.
    pub amp: f64,
}

/// Amplitude envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds (time constant for `exp`).
    pub decay: f64,
    /// Sustain level (ADSR only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustain: Option<f64>,
    /// Release time in seconds (ADSR only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<f64>,
    #[serde(default)]
    pub shape: EnvelopeShape,
}

impl Envelope {
    /// Effective sustain level.
    pub fn sustain_level(&self) -> f64 {
        self.sustain.unwrap_or(DEFAULT_SUSTAIN)
    }

    /// Effective release time.
    pub fn release_time(&self) -> f64 {
        self.release.unwrap_or(DEFAULT_RELEASE)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.3,
            sustain: None,
            release: None,
            shape: EnvelopeShape::Exp,
        }
    }
}

/// Low-frequency modulation applied across the layer's timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Modulation {
    #[serde(default)]
    pub tremolo_hz: f64,
    #[serde(default)]
    pub tremolo_depth: f64,
    #[serde(default)]
    pub pitch_lfo_hz: f64,
    #[serde(default)]
    pub pitch_lfo_depth: f64,
}

impl Modulation {
    /// Returns true if tremolo changes the signal.
    pub fn has_tremolo(&self) -> bool {
        self.tremolo_hz > 0.0 && self.tremolo_depth > 0.0
    }

    /// Returns true if the pitch LFO changes the signal.
    pub fn has_pitch_lfo(&self) -> bool {
        self.pitch_lfo_hz > 0.0 && self.pitch_lfo_depth > 0.0
    }
}

/// Filter descriptor. `cutoff` is the sweep start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    #[serde(rename = "type")]
    pub filter_type: FilterType,
    pub cutoff: f64,
    /// Resonance; only biquad responses use it.
    #[serde(default = "default_q")]
    pub q: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_end: Option<f64>,
    #[serde(default)]
    pub curve: Curve,
}

impl Filter {
    /// Creates a static (non-swept) filter.
    pub fn new(filter_type: FilterType, cutoff: f64) -> Self {
        Self {
            filter_type,
            cutoff,
            q: DEFAULT_Q,
            cutoff_end: None,
            curve: Curve::Linear,
        }
    }

    /// Sweep target; equals `cutoff` when no sweep is declared.
    pub fn end_cutoff(&self) -> f64 {
        self.cutoff_end.unwrap_or(self.cutoff)
    }

    /// Returns true if the cutoff changes over the layer.
    pub fn is_swept(&self) -> bool {
        self.end_cutoff() != self.cutoff
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OscParams {
    pub waveform: Waveform,
    pub freq: f64,
    /// Detune in cents.
    #[serde(default)]
    pub detune: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub harmonics: Vec<Harmonic>,
}

impl OscParams {
    /// Frequency after applying detune.
    pub fn detuned_freq(&self) -> f64 {
        self.freq * 2.0_f64.powf(self.detune / 1200.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChirpParams {
    pub waveform: Waveform,
    pub f_start: f64,
    pub f_end: f64,
    #[serde(default = "default_chirp_curve")]
    pub curve: Curve,
    #[serde(default)]
    pub vibrato_hz: f64,
    #[serde(default)]
    pub vibrato_depth: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub harmonics: Vec<Harmonic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FmParams {
    pub carrier_freq: f64,
    pub mod_freq: f64,
    /// Nominal modulation index.
    pub index: f64,
    #[serde(default)]
    pub waveform: FmWaveform,
    /// Scales the effective index between 0.5x (0.0) and 1.5x (1.0).
    #[serde(default = "default_brightness")]
    pub brightness: f64,
}

impl FmParams {
    /// Modulation index after applying brightness.
    pub fn effective_index(&self) -> f64 {
        self.index * (0.5 + self.brightness)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseParams {
    pub color: NoiseColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_end: Option<f64>,
    #[serde(default)]
    pub cutoff_curve: Curve,
}

impl NoiseParams {
    /// The low-pass sweep applied after generation, if any.
    pub fn sweep_filter(&self) -> Option<Filter> {
        self.cutoff_start.map(|start| Filter {
            filter_type: FilterType::BiquadLp,
            cutoff: start,
            q: DEFAULT_Q,
            cutoff_end: Some(self.cutoff_end.unwrap_or(start)),
            curve: self.cutoff_curve,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImpulseParams {
    pub kind: ImpulseKind,
    /// Pulse width in seconds.
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone_freq: Option<f64>,
}

impl ImpulseParams {
    /// Effective `metal_ping` tone.
    pub fn tone(&self) -> f64 {
        self.tone_freq.unwrap_or(DEFAULT_TONE_FREQ)
    }
}

/// Type-specific parameters of a layer. The variant is the layer's type.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Osc(OscParams),
    Chirp(ChirpParams),
    Fm(FmParams),
    Noise(NoiseParams),
    Impulse(ImpulseParams),
}

impl LayerKind {
    /// The discriminator for this variant.
    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerKind::Osc(_) => LayerType::Osc,
            LayerKind::Chirp(_) => LayerType::Chirp,
            LayerKind::Fm(_) => LayerType::Fm,
            LayerKind::Noise(_) => LayerType::Noise,
            LayerKind::Impulse(_) => LayerType::Impulse,
        }
    }
}

/// A validated layer.
///
/// Serializes to the wire shape (`type` plus a block keyed by the type).
/// Layers are only constructed from JSON through the validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "LayerDoc")]
pub struct Layer {
    pub id: String,
    pub amp: f64,
    pub pan: f64,
    /// Initial phase in radians.
    pub phase: f64,
    pub env: Envelope,
    pub modulation: Option<Modulation>,
    pub filters: Vec<Filter>,
    pub kind: LayerKind,
}

impl Layer {
    /// Creates a centred, full-amplitude layer with the default envelope.
    pub fn new(id: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: id.into(),
            amp: 1.0,
            pan: 0.0,
            phase: 0.0,
            env: Envelope::default(),
            modulation: None,
            filters: Vec::new(),
            kind,
        }
    }

    pub fn layer_type(&self) -> LayerType {
        self.kind.layer_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detuned_freq() {
        let osc = OscParams {
            waveform: Waveform::Sine,
            freq: 440.0,
            detune: 1200.0,
            harmonics: vec![],
        };
        assert!((osc.detuned_freq() - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_fm_effective_index_is_monotonic_and_bounded() {
        let mut fm = FmParams {
            carrier_freq: 440.0,
            mod_freq: 220.0,
            index: 4.0,
            waveform: FmWaveform::Sine,
            brightness: 0.0,
        };
        let mut last = f64::NEG_INFINITY;
        for step in 0..=10 {
            fm.brightness = step as f64 / 10.0;
            let idx = fm.effective_index();
            assert!(idx >= last);
            assert!((2.0..=6.0).contains(&idx));
            last = idx;
        }
        fm.brightness = DEFAULT_BRIGHTNESS;
        assert_eq!(fm.effective_index(), 4.0);
    }

    #[test]
    fn test_noise_sweep_filter_defaults_end_to_start() {
        let noise = NoiseParams {
            color: NoiseColor::White,
            cutoff_start: Some(4000.0),
            cutoff_end: None,
            cutoff_curve: Curve::Exponential,
        };
        let filter = noise.sweep_filter().unwrap();
        assert_eq!(filter.filter_type, FilterType::BiquadLp);
        assert_eq!(filter.end_cutoff(), 4000.0);
        assert!(!filter.is_swept());
    }

    #[test]
    fn test_envelope_defaults() {
        let env = Envelope {
            attack: 0.0,
            decay: 0.2,
            sustain: None,
            release: None,
            shape: EnvelopeShape::Adsr,
        };
        assert_eq!(env.sustain_level(), DEFAULT_SUSTAIN);
        assert_eq!(env.release_time(), DEFAULT_RELEASE);
    }

    #[test]
    fn test_filter_deserialize_defaults() {
        let filter: Filter =
            serde_json::from_str(r#"{"type": "biquad_lp", "cutoff": 800.0}"#).unwrap();
        assert_eq!(filter.q, DEFAULT_Q);
        assert_eq!(filter.curve, Curve::Linear);
        assert_eq!(filter.cutoff_end, None);
    }
}
