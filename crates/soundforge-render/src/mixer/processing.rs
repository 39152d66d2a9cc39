//! Audio processing functions for panning, normalization and clipping.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

/// Mono gain of the equal-power pan law.
///
/// `θ = (pan + 1)·π/4`, `gain = (cos θ + sin θ)/√2`: 1.0 at centre and
/// 1/√2 at either extreme.
#[inline]
pub fn pan_gain(pan: f64) -> f64 {
    let theta = (pan.clamp(-1.0, 1.0) + 1.0) * FRAC_PI_4;
    (theta.cos() + theta.sin()) * FRAC_1_SQRT_2
}

/// Largest absolute sample value, 0 for an empty buffer.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max)
}

/// Scales `samples` so the peak equals `target_peak`. Silent audio is left untouched.
pub fn normalize_to_peak(samples: &mut [f64], target_peak: f64) {
    let current_peak = peak(samples);
    if current_peak > 0.0 {
        let gain = target_peak / current_peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }
}

/// Clamps every sample to [-1, 1].
pub fn hard_clip_buffer(samples: &mut [f64]) {
    for sample in samples.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }
}
