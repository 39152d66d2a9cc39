//! FM synthesis.
//!
//! Two sine operators: `sin(phase_c + I · sin(phase_m))`.

use rand_pcg::Pcg32;
use soundforge_spec::FmParams;

use crate::modulation::{pitch_factor, Lfo};
use crate::oscillator::PhaseAccumulator;

use super::Synthesizer;

/// FM synthesizer parameters.
#[derive(Debug, Clone)]
pub struct FmSynth {
    /// Carrier frequency in Hz.
    pub carrier_freq: f64,
    /// Modulator frequency in Hz.
    pub modulator_freq: f64,
    /// Effective modulation index.
    pub index: f64,
    /// Initial carrier phase in radians.
    pub phase: f64,
    /// Scales both operator frequencies.
    pub pitch_lfo: Option<Lfo>,
}

impl FmSynth {
    /// Creates a new FM synthesizer.
    pub fn new(carrier_freq: f64, modulator_freq: f64, index: f64) -> Self {
        Self {
            carrier_freq,
            modulator_freq,
            index,
            phase: 0.0,
            pitch_lfo: None,
        }
    }

    /// Builds the synth for an `fm` layer block, mapping brightness onto the index.
    pub fn from_params(params: &FmParams, phase: f64, pitch_lfo: Option<Lfo>) -> Self {
        Self {
            carrier_freq: params.carrier_freq,
            modulator_freq: params.mod_freq,
            index: params.effective_index(),
            phase,
            pitch_lfo,
        }
    }
}

impl Synthesizer for FmSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut carrier = PhaseAccumulator::new(sample_rate, self.phase);
        let mut modulator = PhaseAccumulator::new(sample_rate, 0.0);

        (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                let factor = pitch_factor(&[self.pitch_lfo], t);
                let phase_c = carrier.advance(self.carrier_freq * factor);
                let phase_m = modulator.advance(self.modulator_freq * factor);
                (phase_c + self.index * phase_m.sin()).sin()
            })
            .collect()
    }
}
