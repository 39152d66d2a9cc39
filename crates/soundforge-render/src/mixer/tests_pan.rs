//! Tests for the pan law.

use super::*;

#[test]
fn test_pan_center_is_unity() {
    assert!((pan_gain(0.0) - 1.0).abs() < 1e-12);
}

#[test]
fn test_pan_extremes() {
    let edge = std::f64::consts::FRAC_1_SQRT_2;
    assert!((pan_gain(-1.0) - edge).abs() < 1e-12);
    assert!((pan_gain(1.0) - edge).abs() < 1e-12);
}

#[test]
fn test_pan_is_symmetric() {
    for i in 0..=20 {
        let pan = i as f64 / 20.0;
        assert!((pan_gain(pan) - pan_gain(-pan)).abs() < 1e-12);
    }
}

#[test]
fn test_pan_out_of_range_is_clamped() {
    assert_eq!(pan_gain(5.0), pan_gain(1.0));
}
