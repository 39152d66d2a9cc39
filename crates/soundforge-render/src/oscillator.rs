//! Basic waveform generators and noise sources.
//!
//! Waveforms take a phase in radians in `[0, 2π)` and return a value in
//! `[-1, 1]`.

use std::f64::consts::PI;

use rand_pcg::Pcg32;
use soundforge_spec::Waveform;

use crate::rng;

/// 2π.
pub const TWO_PI: f64 = 2.0 * PI;

/// Sine wave.
#[inline]
pub fn sine(phase: f64) -> f64 {
    phase.sin()
}

/// Triangle wave: +1 at phase 0, -1 at π.
#[inline]
pub fn triangle(phase: f64) -> f64 {
    2.0 * (2.0 * (phase / TWO_PI - 0.5)).abs() - 1.0
}

/// Square wave with 50% duty.
#[inline]
pub fn square(phase: f64) -> f64 {
    if phase < PI {
        1.0
    } else {
        -1.0
    }
}

/// Rising sawtooth.
#[inline]
pub fn sawtooth(phase: f64) -> f64 {
    2.0 * phase / TWO_PI - 1.0
}

/// Evaluates `waveform` at `phase`.
#[inline]
pub fn waveform(waveform: Waveform, phase: f64) -> f64 {
    match waveform {
        Waveform::Sine => sine(phase),
        Waveform::Triangle => triangle(phase),
        Waveform::Square => square(phase),
        Waveform::Saw => sawtooth(phase),
    }
}

/// Wraps a phase into `[0, 2π)`.
#[inline]
pub fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase.rem_euclid(TWO_PI);
    // rem_euclid can round up to exactly 2π for tiny negative inputs
    if wrapped >= TWO_PI {
        0.0
    } else {
        wrapped
    }
}

/// Phase accumulator for oscillators.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates a new phase accumulator starting at `initial_phase` radians.
    pub fn new(sample_rate: f64, initial_phase: f64) -> Self {
        Self {
            phase: wrap_phase(initial_phase),
            sample_rate,
        }
    }

    /// Returns the current phase and advances by one sample at `frequency`.
    #[inline]
    pub fn advance(&mut self, frequency: f64) -> f64 {
        let current = self.phase;
        self.phase = wrap_phase(self.phase + TWO_PI * frequency / self.sample_rate);
        current
    }

    /// Current phase in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }
}

/// Generates white noise, one draw per sample.
pub fn white_noise(rng: &mut Pcg32, num_samples: usize) -> Vec<f64> {
    (0..num_samples).map(|_| rng::bipolar(rng)).collect()
}

/// Pink noise filter state (Paul Kellet's refined method).
#[derive(Debug, Clone, Default)]
pub struct PinkNoise {
    b: [f64; 7],
}

impl PinkNoise {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes one white sample.
    #[inline]
    pub fn process(&mut self, white: f64) -> f64 {
        let b = &mut self.b;
        b[0] = 0.99886 * b[0] + white * 0.0555179;
        b[1] = 0.99332 * b[1] + white * 0.0750759;
        b[2] = 0.96900 * b[2] + white * 0.1538520;
        b[3] = 0.86650 * b[3] + white * 0.3104856;
        b[4] = 0.55000 * b[4] + white * 0.5329522;
        b[5] = -0.7616 * b[5] - white * 0.0168980;
        let pink = b[0] + b[1] + b[2] + b[3] + b[4] + b[5] + b[6] + white * 0.5362;
        b[6] = white * 0.115926;
        pink * 0.11
    }
}

/// Generates pink noise from the white stream, one draw per sample.
pub fn pink_noise(rng: &mut Pcg32, num_samples: usize) -> Vec<f64> {
    let mut filter = PinkNoise::new();
    (0..num_samples)
        .map(|_| filter.process(rng::bipolar(rng)))
        .collect()
}
