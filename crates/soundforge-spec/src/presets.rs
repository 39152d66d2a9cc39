//! Built-in SoundSpec presets.
//!
//! Each preset is stored as its wire JSON and goes through the validator like
//! any other document.

use serde_json::{json, Value};

use crate::spec::SoundSpec;
use crate::validation;

/// Names of every built-in preset.
pub const PRESET_NAMES: &[&str] = &[
    "gentle_pickup",
    "ui_click",
    "laser_blast",
    "explosion",
    "shield_deflect",
];

/// Wire JSON of a preset.
pub fn preset_json(name: &str) -> Option<Value> {
    let value = match name {
        "gentle_pickup" => gentle_pickup(),
        "ui_click" => ui_click(),
        "laser_blast" => laser_blast(),
        "explosion" => explosion(),
        "shield_deflect" => shield_deflect(),
        _ => return None,
    };
    Some(value)
}

/// A validated preset, or `None` for an unknown name.
pub fn get(name: &str) -> Option<SoundSpec> {
    preset_json(name).and_then(|value| validation::validate_value(&value).ok())
}

/// Every preset, in [`PRESET_NAMES`] order.
pub fn all() -> Vec<(&'static str, SoundSpec)> {
    PRESET_NAMES
        .iter()
        .filter_map(|&name| get(name).map(|spec| (name, spec)))
        .collect()
}

fn gentle_pickup() -> Value {
    json!({
        "version": "soundspec-1",
        "name": "gentle_pickup",
        "description": "Soft coin pickup with a shimmering overtone",
        "sample_rate": 44100,
        "duration": 0.8,
        "seed": 42,
        "global": {"amp": 0.7, "normalize": true},
        "layers": [
            {
                "id": "main",
                "type": "osc",
                "amp": 0.8,
                "env": {"attack": 0.05, "decay": 0.6, "shape": "exp"},
                "mod": {"tremolo_hz": 8.0, "tremolo_depth": 0.2},
                "osc": {
                    "waveform": "sine",
                    "freq": 800.0,
                    "harmonics": [{"mul": 2.0, "amp": 0.3}, {"mul": 3.0, "amp": 0.15}]
                }
            },
            {
                "id": "sparkle",
                "type": "osc",
                "amp": 0.4,
                "env": {"attack": 0.02, "decay": 0.4},
                "osc": {"waveform": "sine", "freq": 2400.0, "detune": 5.0}
            }
        ],
        "params": [
            {"id": "main_freq", "label": "Main Frequency", "kind": "slider",
             "path": "layers_by_id.main.osc.freq", "min": 400, "max": 1200, "step": 10, "default": 800},
            {"id": "sparkle_freq", "label": "Sparkle Frequency", "kind": "slider",
             "path": "layers_by_id.sparkle.osc.freq", "min": 1800, "max": 3600, "step": 50, "default": 2400},
            {"id": "tremolo_rate", "label": "Tremolo Rate", "kind": "slider",
             "path": "layers_by_id.main.mod.tremolo_hz", "min": 0, "max": 20, "step": 0.5, "default": 8},
            {"id": "duration", "label": "Duration", "kind": "slider",
             "path": "duration", "min": 0.3, "max": 2.0, "step": 0.1, "default": 0.8}
        ]
    })
}

fn ui_click() -> Value {
    json!({
        "version": "soundspec-1",
        "name": "ui_click",
        "description": "Crisp interface click with a short tonal tail",
        "sample_rate": 44100,
        "duration": 0.08,
        "seed": 100,
        "global": {"amp": 0.6, "normalize": true},
        "layers": [
            {
                "id": "click",
                "type": "impulse",
                "amp": 0.8,
                "env": {"attack": 0.001, "decay": 0.05},
                "impulse": {"kind": "click", "width": 0.002}
            },
            {
                "id": "tone",
                "type": "osc",
                "amp": 0.5,
                "env": {"attack": 0.001, "decay": 0.04},
                "osc": {"waveform": "sine", "freq": 1200.0}
            }
        ],
        "params": [
            {"id": "tone_freq", "label": "Tone Frequency", "kind": "slider",
             "path": "layers_by_id.tone.osc.freq", "min": 800, "max": 2000, "step": 50, "default": 1200}
        ]
    })
}

fn laser_blast() -> Value {
    json!({
        "version": "soundspec-1",
        "name": "laser_blast",
        "description": "Descending sawtooth zap",
        "sample_rate": 44100,
        "duration": 0.4,
        "seed": 42,
        "global": {"amp": 0.8, "normalize": true},
        "layers": [
            {
                "id": "main",
                "type": "chirp",
                "amp": 0.9,
                "env": {"attack": 0.01, "decay": 0.3},
                "chirp": {"waveform": "saw", "f_start": 1200.0, "f_end": 200.0, "curve": "exponential"}
            }
        ],
        "fx_chain": [
            {"type": "softclip", "params": {"drive": 1.5}}
        ],
        "params": [
            {"id": "start_freq", "label": "Start Frequency", "kind": "slider",
             "path": "layers_by_id.main.chirp.f_start", "min": 800, "max": 2000, "step": 50, "default": 1200},
            {"id": "end_freq", "label": "End Frequency", "kind": "slider",
             "path": "layers_by_id.main.chirp.f_end", "min": 100, "max": 500, "step": 10, "default": 200},
            {"id": "duration", "label": "Duration", "kind": "slider",
             "path": "duration", "min": 0.1, "max": 1.0, "step": 0.05, "default": 0.4}
        ]
    })
}

fn explosion() -> Value {
    json!({
        "version": "soundspec-1",
        "name": "explosion",
        "description": "Low rumble under a bright noise crack",
        "sample_rate": 44100,
        "duration": 1.2,
        "seed": 123,
        "global": {"amp": 0.85, "normalize": true},
        "layers": [
            {
                "id": "rumble",
                "type": "osc",
                "amp": 0.6,
                "env": {"attack": 0.01, "decay": 0.8},
                "filter": [
                    {"type": "biquad_lp", "cutoff": 800.0, "cutoff_end": 100.0,
                     "curve": "exponential", "q": 0.707}
                ],
                "osc": {"waveform": "sine", "freq": 60.0}
            },
            {
                "id": "crack",
                "type": "noise",
                "amp": 0.8,
                "env": {"attack": 0.001, "decay": 0.15},
                "noise": {"color": "white", "cutoff_start": 8000.0, "cutoff_end": 2000.0,
                          "cutoff_curve": "exponential"}
            }
        ],
        "params": [
            {"id": "rumble_freq", "label": "Rumble Frequency", "kind": "slider",
             "path": "layers_by_id.rumble.osc.freq", "min": 40, "max": 120, "step": 5, "default": 60},
            {"id": "crack_amp", "label": "Crack Level", "kind": "slider",
             "path": "layers_by_id.crack.amp", "min": 0, "max": 1, "step": 0.05, "default": 0.8}
        ]
    })
}

fn shield_deflect() -> Value {
    json!({
        "version": "soundspec-1",
        "name": "shield_deflect",
        "description": "Metallic ping with an FM shimmer",
        "sample_rate": 44100,
        "duration": 0.6,
        "seed": 789,
        "global": {"amp": 0.75, "normalize": true},
        "layers": [
            {
                "id": "ping",
                "type": "impulse",
                "amp": 0.7,
                "env": {"attack": 0.001, "decay": 0.3},
                "impulse": {"kind": "metal_ping", "width": 0.005, "tone_freq": 1800.0}
            },
            {
                "id": "shimmer",
                "type": "fm",
                "amp": 0.5,
                "env": {"attack": 0.05, "decay": 0.4},
                "fm": {"carrier_freq": 2400.0, "mod_freq": 7.0, "index": 3.0, "brightness": 0.6}
            }
        ],
        "params": [
            {"id": "ping_freq", "label": "Ping Tone", "kind": "slider",
             "path": "layers_by_id.ping.impulse.tone_freq", "min": 1000, "max": 3000, "step": 100, "default": 1800},
            {"id": "shimmer_brightness", "label": "Shimmer Brightness", "kind": "slider",
             "path": "layers_by_id.shimmer.fm.brightness", "min": 0, "max": 1, "step": 0.05, "default": 0.6}
        ]
    })
}
