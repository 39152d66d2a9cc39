//! Tests for layer mixing.

use super::*;

#[test]
fn test_single_centered_layer() {
    let mut mixer = Mixer::new(4);
    mixer.add_layer(&MixLayer::centered(vec![1.0, -1.0, 0.5, 0.0], 0.5));
    let mixed = mixer.mix(1.0);
    for (m, e) in mixed.iter().zip([0.5, -0.5, 0.25, 0.0]) {
        assert!((m - e).abs() < 1e-12);
    }
}

#[test]
fn test_layers_sum_then_global_amp() {
    let mut mixer = Mixer::new(2);
    mixer.add_layer(&MixLayer::centered(vec![0.2, 0.2], 1.0));
    mixer.add_layer(&MixLayer::centered(vec![0.3, -0.1], 1.0));
    assert_eq!(mixer.num_layers(), 2);
    let mixed = mixer.mix(0.5);
    assert!((mixed[0] - 0.25).abs() < 1e-12);
    assert!((mixed[1] - 0.05).abs() < 1e-12);
}

#[test]
fn test_hard_panned_layer_is_attenuated() {
    let mut mixer = Mixer::new(1);
    mixer.add_layer(&MixLayer::new(vec![1.0], 1.0, -1.0));
    let mixed = mixer.mix(1.0);
    assert!((mixed[0] - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
}

#[test]
fn test_short_layer_is_zero_padded() {
    let mut mixer = Mixer::new(3);
    mixer.add_layer(&MixLayer::centered(vec![1.0], 1.0));
    let mixed = mixer.mix(1.0);
    assert_eq!(&mixed[1..], &[0.0, 0.0]);
}

#[test]
fn test_empty_mixer_is_silent() {
    let mixed = Mixer::new(8).mix(1.0);
    assert_eq!(mixed, vec![0.0; 8]);
}
