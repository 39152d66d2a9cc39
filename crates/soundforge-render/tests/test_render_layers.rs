//! Layer-level integration tests built from typed specs.

use pretty_assertions::assert_eq;
use soundforge_render::{render, render_wav};
use soundforge_spec::{
    ChirpParams, Curve, Envelope, EnvelopeShape, Filter, FilterType, FmParams, FmWaveform, Fx,
    FxKind, GlobalSettings, ImpulseKind, ImpulseParams, Layer, LayerKind, NoiseColor, NoiseParams,
    OscParams, SoundSpec, Waveform, SPEC_VERSION,
};

fn spec(layers: Vec<Layer>, fx_chain: Vec<Fx>) -> SoundSpec {
    SoundSpec {
        version: SPEC_VERSION.to_string(),
        name: "layers".to_string(),
        description: String::new(),
        sample_rate: 22050,
        duration: 0.2,
        seed: 42,
        global: GlobalSettings {
            amp: 1.0,
            normalize: false,
        },
        layers,
        fx_chain,
        params: vec![],
    }
}

fn held_envelope() -> Envelope {
    Envelope {
        attack: 0.0,
        decay: 2.0,
        sustain: Some(1.0),
        release: Some(0.0),
        shape: EnvelopeShape::Adsr,
    }
}

fn sine(freq: f64) -> Layer {
    let mut layer = Layer::new(
        "sine",
        LayerKind::Osc(OscParams {
            waveform: Waveform::Sine,
            freq,
            detune: 0.0,
            harmonics: vec![],
        }),
    );
    layer.env = held_envelope();
    layer
}

fn click() -> Layer {
    let mut layer = Layer::new(
        "click",
        LayerKind::Impulse(ImpulseParams {
            kind: ImpulseKind::Click,
            width: 0.001,
            tone_freq: None,
        }),
    );
    layer.env = held_envelope();
    layer
}

fn peak(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0, |m, s| m.max(s.abs()))
}

// ============================================================================
// Mixer Tests
// ============================================================================

#[test]
fn test_pan_keeps_mono_level_constant_at_center() {
    let samples = render(&spec(vec![sine(441.0)], vec![]));
    // 441 Hz never lands exactly on a sample peak at 22050 Hz
    assert!((peak(&samples) - 1.0).abs() < 1e-2);
}

#[test]
fn test_hard_pan_attenuates_mono_fold() {
    let mut layer = sine(441.0);
    layer.pan = 1.0;
    let samples = render(&spec(vec![layer], vec![]));
    // cos(π/2) + sin(π/2) over √2
    assert!((peak(&samples) - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-2);
}

#[test]
fn test_layer_amp_scales_linearly() {
    let full = render(&spec(vec![sine(441.0)], vec![]));
    let mut quiet = sine(441.0);
    quiet.amp = 0.25;
    let quiet = render(&spec(vec![quiet], vec![]));
    for (a, b) in full.iter().zip(&quiet) {
        assert!((a * 0.25 - b).abs() < 1e-12);
    }
}

#[test]
fn test_sum_past_unity_is_clamped() {
    let samples = render(&spec(vec![sine(441.0), sine(441.0)], vec![]));
    assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    assert!(samples.iter().any(|&s| s == 1.0));
}

// ============================================================================
// Layer Type Tests
// ============================================================================

#[test]
fn test_click_is_silent_after_pulse() {
    let samples = render(&spec(vec![click()], vec![]));
    // round(0.001 · 22050) = 22 samples
    assert!(samples[0] > 0.9);
    assert!(samples[22..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_chirp_sweeps_downward() {
    let mut layer = Layer::new(
        "chirp",
        LayerKind::Chirp(ChirpParams {
            waveform: Waveform::Sine,
            f_start: 2000.0,
            f_end: 200.0,
            curve: Curve::Linear,
            vibrato_hz: 0.0,
            vibrato_depth: 0.0,
            harmonics: vec![],
        }),
    );
    layer.env = held_envelope();
    let samples = render(&spec(vec![layer], vec![]));

    let crossings = |s: &[f64]| s.windows(2).filter(|w| w[0] < 0.0 && w[1] >= 0.0).count();
    let quarter = samples.len() / 4;
    assert!(crossings(&samples[..quarter]) > crossings(&samples[3 * quarter..]) * 2);
}

#[test]
fn test_fm_with_zero_index_is_pure_carrier() {
    let mut fm = Layer::new(
        "fm",
        LayerKind::Fm(FmParams {
            carrier_freq: 441.0,
            mod_freq: 100.0,
            index: 0.0,
            waveform: FmWaveform::Sine,
            brightness: 0.5,
        }),
    );
    fm.env = held_envelope();
    let a = render(&spec(vec![fm], vec![]));
    let b = render(&spec(vec![sine(441.0)], vec![]));
    for (x, y) in a.iter().zip(&b) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn test_lowpass_filter_darkens_noise() {
    let noise = |filters: Vec<Filter>| {
        let mut layer = Layer::new(
            "noise",
            LayerKind::Noise(NoiseParams {
                color: NoiseColor::White,
                cutoff_start: None,
                cutoff_end: None,
                cutoff_curve: Curve::Linear,
            }),
        );
        layer.env = held_envelope();
        layer.filters = filters;
        render(&spec(vec![layer], vec![]))
    };
    let roughness = |s: &[f64]| s.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>();

    let raw = noise(vec![]);
    let dark = noise(vec![Filter::new(FilterType::BiquadLp, 300.0)]);
    assert!(roughness(&dark) < roughness(&raw) * 0.2);
}

// ============================================================================
// FX Tests
// ============================================================================

#[test]
fn test_delay_echoes_click() {
    let fx = Fx::new(FxKind::Delay {
        time_ms: 100.0,
        feedback: 0.0,
        mix: 0.5,
    });
    let samples = render(&spec(vec![click()], vec![fx]));
    // 100 ms at 22050 Hz
    assert!(samples[1000..2205].iter().all(|&s| s == 0.0));
    assert!((samples[2205] - samples[0] * 0.5).abs() < 1e-12);
}

#[test]
fn test_disabled_fx_leaves_output_unchanged() {
    let mut fx = Fx::new(FxKind::Softclip { drive: 8.0 });
    fx.enabled = false;
    let dry = render_wav(&spec(vec![sine(441.0)], vec![]));
    let wet = render_wav(&spec(vec![sine(441.0)], vec![fx]));
    assert_eq!(dry.pcm_hash, wet.pcm_hash);
}

#[test]
fn test_fx_normalize_sets_peak() {
    let mut layer = sine(441.0);
    layer.amp = 0.2;
    let fx = Fx::new(FxKind::Normalize { target_peak: 0.5 });
    let samples = render(&spec(vec![layer], vec![fx]));
    assert!((peak(&samples) - 0.5).abs() < 1e-12);
}
