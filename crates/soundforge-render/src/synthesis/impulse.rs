//! Impulse synthesis: short transients placed at the start of the buffer.
//!
//! The pulse is `w = max(1, round(width · sr))` samples long (ten widths for
//! `metal_ping`); anything past the end of the buffer is dropped.

use std::f64::consts::TAU;

use rand_pcg::Pcg32;
use soundforge_spec::{ImpulseKind, ImpulseParams};

use crate::rng;

use super::Synthesizer;

/// Inharmonic partials of the metal ping as (frequency ratio, amplitude).
const PING_PARTIALS: [(f64, f64); 3] = [(1.0, 1.0), (2.3, 0.5), (3.7, 0.3)];

#[derive(Debug, Clone)]
pub struct ImpulseSynth {
    pub kind: ImpulseKind,
    /// Pulse width in seconds.
    pub width: f64,
    /// Ping fundamental in Hz.
    pub tone_freq: f64,
}

impl ImpulseSynth {
    pub fn from_params(params: &ImpulseParams) -> Self {
        Self {
            kind: params.kind,
            width: params.width,
            tone_freq: params.tone(),
        }
    }

    /// Pulse width in samples.
    pub fn width_samples(&self, sample_rate: f64) -> usize {
        ((self.width * sample_rate).round() as usize).max(1)
    }
}

impl Synthesizer for ImpulseSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut output = vec![0.0; num_samples];
        let w = self.width_samples(sample_rate);
        let wf = w as f64;

        match self.kind {
            ImpulseKind::Click => {
                for (i, sample) in output.iter_mut().take(w).enumerate() {
                    *sample = (-(i as f64) / (0.3 * wf)).exp();
                }
            }
            ImpulseKind::Tap => {
                for (i, sample) in output.iter_mut().take(w).enumerate() {
                    let jitter = 0.7 + 0.3 * rng::unit(rng);
                    *sample = (1.0 - i as f64 / wf) * jitter;
                }
            }
            ImpulseKind::MetalPing => {
                for (i, sample) in output.iter_mut().take(10 * w).enumerate() {
                    let t = i as f64 / sample_rate;
                    let partials: f64 = PING_PARTIALS
                        .iter()
                        .map(|&(ratio, amp)| amp * (TAU * ratio * self.tone_freq * t).sin())
                        .sum();
                    *sample = (-t / self.width).exp() * partials;
                }
            }
        }

        output
    }
}
