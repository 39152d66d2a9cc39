//! Preset rendering and determinism integration tests.

use soundforge_render::{render, render_wav, try_render};
use soundforge_spec::{path, presets, NORMALIZE_CEILING};

// ============================================================================
// Preset Tests
// ============================================================================

#[test]
fn test_every_preset_renders() {
    for (name, spec) in presets::all() {
        let samples = render(&spec);
        assert_eq!(samples.len(), spec.num_samples(), "{}", name);
        assert!(
            samples.iter().all(|s| s.is_finite() && (-1.0..=1.0).contains(s)),
            "{} left the unit range",
            name
        );
    }
}

#[test]
fn test_normalized_presets_peak_at_ceiling() {
    for (name, spec) in presets::all() {
        assert!(spec.global.normalize);
        let peak = render(&spec).iter().fold(0.0_f64, |m, s| m.max(s.abs()));
        assert!((peak - NORMALIZE_CEILING).abs() < 1e-9, "{} peak {}", name, peak);
    }
}

#[test]
fn test_presets_pass_try_render() {
    for (name, spec) in presets::all() {
        assert!(try_render(&spec).is_ok(), "{}", name);
    }
}

#[test]
fn test_presets_sound_different() {
    let hashes: Vec<String> = presets::all()
        .iter()
        .map(|(_, spec)| render_wav(spec).pcm_hash)
        .collect();
    for (i, a) in hashes.iter().enumerate() {
        for b in &hashes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_preset_wav_is_byte_identical_across_renders() {
    for (name, spec) in presets::all() {
        let a = render_wav(&spec);
        let b = render_wav(&spec);
        assert_eq!(a.wav_data, b.wav_data, "{}", name);
        assert_eq!(a.pcm_hash, b.pcm_hash, "{}", name);
    }
}

#[test]
fn test_explosion_depends_on_seed() {
    let mut spec = presets::get("explosion").unwrap();
    let a = render_wav(&spec).pcm_hash;
    spec.seed += 1;
    assert_ne!(render_wav(&spec).pcm_hash, a);
}

#[test]
fn test_laser_ignores_seed() {
    let mut spec = presets::get("laser_blast").unwrap();
    let a = render(&spec);
    spec.seed = 9999;
    assert_eq!(render(&spec), a);
}

#[test]
fn test_param_edit_changes_output() {
    let mut spec = presets::get("laser_blast").unwrap();
    let before = render_wav(&spec).pcm_hash;

    path::set(&mut spec, "layers_by_id.main.chirp.f_end", 150.0).unwrap();
    let after = render_wav(&spec).pcm_hash;
    assert_ne!(before, after);

    path::set(&mut spec, "layers_by_id.main.chirp.f_end", 200.0).unwrap();
    assert_eq!(render_wav(&spec).pcm_hash, before);
}

#[test]
fn test_duration_edit_changes_length() {
    let mut spec = presets::get("gentle_pickup").unwrap();
    path::set(&mut spec, "duration", 0.5).unwrap();
    let wav = render_wav(&spec);
    assert_eq!(wav.num_samples, 22050);
    assert_eq!(wav.wav_data.len(), 44 + 2 * 22050);
}
