//! Noise synthesis module.
//!
//! Generates white or pink noise from the render's random stream, with an
//! optional swept low-pass filter.

use rand_pcg::Pcg32;
use soundforge_spec::{Filter, NoiseColor, NoiseParams};

use crate::filter::FilterStage;
use crate::oscillator;

use super::Synthesizer;

/// Noise burst synthesizer.
#[derive(Debug, Clone)]
pub struct NoiseSynth {
    pub color: NoiseColor,
    /// Low-pass sweep applied after generation.
    pub filter: Option<Filter>,
}

impl NoiseSynth {
    /// Creates white noise synthesizer.
    pub fn white() -> Self {
        Self::new(NoiseColor::White)
    }

    /// Creates pink noise synthesizer.
    pub fn pink() -> Self {
        Self::new(NoiseColor::Pink)
    }

    pub fn new(color: NoiseColor) -> Self {
        Self {
            color,
            filter: None,
        }
    }

    /// Builds the synth for a `noise` layer block.
    pub fn from_params(params: &NoiseParams) -> Self {
        Self {
            color: params.color,
            filter: params.sweep_filter(),
        }
    }
}

impl Synthesizer for NoiseSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut samples = match self.color {
            NoiseColor::White => oscillator::white_noise(rng, num_samples),
            NoiseColor::Pink => oscillator::pink_noise(rng, num_samples),
        };

        if let Some(filter) = &self.filter {
            FilterStage::new(filter, sample_rate).process_buffer(&mut samples);
        }

        samples
    }
}
