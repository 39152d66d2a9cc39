//! Tests for normalization and clipping.

use super::*;

#[test]
fn test_normalize_basic() {
    let mut samples = vec![0.5, -0.3, 0.8, -0.2];
    normalize_to_peak(&mut samples, 0.95);
    assert!((peak(&samples) - 0.95).abs() < 1e-12);
    // Relative shape is preserved.
    assert!((samples[0] / samples[2] - 0.625).abs() < 1e-12);
}

#[test]
fn test_normalize_silent_audio() {
    let mut samples = vec![0.0; 4];
    normalize_to_peak(&mut samples, 0.95);
    assert!(samples.iter().all(|&s| s == 0.0));
}

#[test]
fn test_normalize_loud_audio() {
    let mut samples = vec![2.0, -1.5, 3.0, -2.5];
    normalize_to_peak(&mut samples, 0.5);
    assert!((peak(&samples) - 0.5).abs() < 1e-12);
}

#[test]
fn test_normalize_negative_peak() {
    let mut samples = vec![0.1, -0.4];
    normalize_to_peak(&mut samples, 0.8);
    assert!((samples[1] + 0.8).abs() < 1e-12);
}

#[test]
fn test_peak_of_empty_buffer() {
    assert_eq!(peak(&[]), 0.0);
}

#[test]
fn test_hard_clip() {
    let mut samples = vec![1.5, -2.0, 0.25];
    hard_clip_buffer(&mut samples);
    assert_eq!(samples, vec![1.0, -1.0, 0.25]);
}
