//! Per-layer signal generators.
//!
//! One module per layer type:
//! - `oscillators` - Periodic waveforms, fixed (`osc`) or gliding (`chirp`)
//! - `fm` - Two-operator FM
//! - `noise` - White and pink noise with an optional low-pass sweep
//! - `impulse` - Clicks, taps and metallic pings

pub mod fm;
pub mod impulse;
pub mod noise;
pub mod oscillators;

use rand_pcg::Pcg32;
use soundforge_spec::{Curve, Harmonic, Waveform};

use crate::oscillator::{self, wrap_phase};

/// Common trait for all synthesis modules.
pub trait Synthesizer {
    /// Generates audio samples.
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples to generate
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `rng` - The render's random stream; only noise-based generators draw from it
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64>;
}

/// Sweep position of sample `i` in a buffer of `n`: `i / (n − 1)`, or 0 when `n <= 1`.
///
/// The first sample sits exactly on the start value and the last exactly on
/// the end value.
#[inline]
pub fn sweep_position(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Interpolates between `start` and `end` at progress `u` in `[0, 1]`.
///
/// Exponential interpolation falls back to linear for non-positive endpoints.
/// `u = 1` returns `end` exactly.
#[inline]
pub fn interpolate(curve: Curve, start: f64, end: f64, u: f64) -> f64 {
    if u >= 1.0 {
        return end;
    }
    match curve {
        Curve::Linear => start + (end - start) * u,
        Curve::Exponential => {
            if start <= 0.0 || end <= 0.0 {
                start + (end - start) * u
            } else {
                start * (end / start).powf(u)
            }
        }
    }
}

/// Frequency (or cutoff) sweep parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencySweep {
    pub start_freq: f64,
    pub end_freq: f64,
    pub curve: Curve,
}

impl FrequencySweep {
    pub fn new(start_freq: f64, end_freq: f64, curve: Curve) -> Self {
        Self {
            start_freq,
            end_freq,
            curve,
        }
    }

    /// Gets the frequency at progress `u` (0.0 to 1.0).
    #[inline]
    pub fn at(&self, u: f64) -> f64 {
        interpolate(self.curve, self.start_freq, self.end_freq, u)
    }
}

/// Fundamental plus harmonics at `phase`: `w(p) + Σ w(p · mul) · amp`.
#[inline]
pub fn with_harmonics(waveform: Waveform, phase: f64, harmonics: &[Harmonic]) -> f64 {
    harmonics
        .iter()
        .fold(oscillator::waveform(waveform, phase), |acc, h| {
            acc + oscillator::waveform(waveform, wrap_phase(phase * h.mul)) * h.amp
        })
}
