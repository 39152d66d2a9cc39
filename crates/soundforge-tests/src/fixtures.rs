//! Spec documents shared by the end-to-end tests.

use serde_json::{json, Value};
use soundforge_spec::{validate_value, SoundSpec};

/// Validates a fixture document, panicking with the error list on failure.
pub fn load(value: &Value) -> SoundSpec {
    match validate_value(value) {
        Ok(spec) => spec,
        Err(result) => panic!("fixture failed validation:\n{}", result),
    }
}

/// Root document around `layers` with a 44.1 kHz rate.
pub fn document(duration: f64, seed: u32, layers: Value) -> Value {
    json!({
        "name": "fixture",
        "description": "end-to-end fixture",
        "sample_rate": 44100,
        "duration": duration,
        "seed": seed,
        "global": {"amp": 1.0},
        "layers": layers
    })
}

/// Plain sine at `freq` with no attack.
pub fn sine_layer(id: &str, freq: f64) -> Value {
    json!({
        "id": id,
        "type": "osc",
        "amp": 1.0,
        "env": {"attack": 0.0, "decay": 0.5},
        "osc": {"waveform": "sine", "freq": freq}
    })
}

/// White noise burst.
pub fn noise_layer(id: &str) -> Value {
    json!({
        "id": id,
        "type": "noise",
        "amp": 0.8,
        "env": {"attack": 0.001, "decay": 0.1},
        "noise": {"color": "white"}
    })
}

/// Exponential chirp from `f_start` to `f_end`.
pub fn chirp_layer(id: &str, f_start: f64, f_end: f64) -> Value {
    json!({
        "id": id,
        "type": "chirp",
        "amp": 1.0,
        "env": {"attack": 0.0, "decay": 0.3},
        "chirp": {"waveform": "sine", "f_start": f_start, "f_end": f_end, "curve": "exponential"}
    })
}

/// A spec touching every layer type, filter kind and effect.
pub fn kitchen_sink() -> Value {
    json!({
        "name": "kitchen_sink",
        "description": "every feature at once",
        "sample_rate": 48000,
        "duration": 0.5,
        "seed": 2024,
        "global": {"amp": 0.9, "normalize": true},
        "layers": [
            {"id": "osc", "type": "osc", "amp": 0.5, "pan": -0.4, "phase": 0.25,
             "env": {"attack": 0.02, "decay": 0.2, "sustain": 0.3, "release": 0.1, "shape": "adsr"},
             "mod": {"tremolo_hz": 5.0, "tremolo_depth": 0.4},
             "filter": [{"type": "hp1", "cutoff": 120.0}, {"type": "notch", "cutoff": 1000.0, "q": 2.0}],
             "osc": {"waveform": "triangle", "freq": 330.0, "detune": 12.0,
                     "harmonics": [{"mul": 2.0, "amp": 0.4}]}},
            {"id": "chirp", "type": "chirp", "amp": 0.4, "pan": 0.6,
             "env": {"attack": 0.0, "decay": 0.25, "shape": "lin"},
             "filter": [{"type": "biquad_bp", "cutoff": 2000.0, "cutoff_end": 500.0, "q": 1.5}],
             "chirp": {"waveform": "square", "f_start": 1500.0, "f_end": 300.0,
                       "vibrato_hz": 7.0, "vibrato_depth": 0.02}},
            {"id": "fm", "type": "fm", "amp": 0.4,
             "env": {"attack": 0.01, "decay": 0.3},
             "mod": {"pitch_lfo_hz": 4.0, "pitch_lfo_depth": 0.03},
             "fm": {"carrier_freq": 600.0, "mod_freq": 300.0, "index": 4.0, "brightness": 0.8}},
            {"id": "pink", "type": "noise", "amp": 0.3,
             "env": {"attack": 0.0, "decay": 0.2},
             "filter": [{"type": "lp1", "cutoff": 5000.0}],
             "noise": {"color": "pink", "cutoff_start": 6000.0, "cutoff_end": 800.0}},
            {"id": "tap", "type": "impulse", "amp": 0.6,
             "env": {"attack": 0.0, "decay": 0.05},
             "impulse": {"kind": "tap", "width": 0.004}},
            {"id": "ping", "type": "impulse", "amp": 0.4,
             "env": {"attack": 0.0, "decay": 0.2},
             "filter": [{"type": "biquad_hp", "cutoff": 400.0}],
             "impulse": {"kind": "metal_ping", "width": 0.003, "tone_freq": 2500.0}}
        ],
        "fx_chain": [
            {"type": "softclip", "params": {"drive": 2.0}},
            {"type": "bitcrush", "params": {"steps": 64, "hold_samples": 2}},
            {"type": "delay", "params": {"time_ms": 60.0, "feedback": 0.4, "mix": 0.3}},
            {"type": "normalize", "enabled": false, "params": {"target_peak": 0.5}}
        ],
        "params": [
            {"id": "osc_freq", "label": "Osc Frequency", "kind": "slider",
             "path": "layers_by_id.osc.osc.freq", "min": 100, "max": 800, "step": 10, "default": 330},
            {"id": "drive", "label": "Drive", "kind": "slider",
             "path": "fx_chain[0].params.drive", "min": 0, "max": 4, "default": 2},
            {"id": "normalize", "label": "Normalize", "kind": "checkbox",
             "path": "global.normalize", "default": true}
        ]
    })
}
