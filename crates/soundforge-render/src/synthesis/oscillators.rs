//! Periodic waveform synthesis: fixed-pitch oscillators and glides.

use rand_pcg::Pcg32;
use soundforge_spec::{ChirpParams, Harmonic, OscParams, Waveform};

use crate::modulation::{pitch_factor, Lfo};
use crate::oscillator::PhaseAccumulator;

use super::{sweep_position, with_harmonics, FrequencySweep, Synthesizer};

/// Fixed-pitch oscillator with optional harmonics and pitch LFO.
#[derive(Debug, Clone)]
pub struct OscSynth {
    pub waveform: Waveform,
    /// Frequency in Hz, detune already applied.
    pub frequency: f64,
    pub harmonics: Vec<Harmonic>,
    /// Initial phase in radians.
    pub phase: f64,
    pub pitch_lfo: Option<Lfo>,
}

impl OscSynth {
    pub fn new(waveform: Waveform, frequency: f64) -> Self {
        Self {
            waveform,
            frequency,
            harmonics: Vec::new(),
            phase: 0.0,
            pitch_lfo: None,
        }
    }

    /// Builds the synth for an `osc` layer block.
    pub fn from_params(params: &OscParams, phase: f64, pitch_lfo: Option<Lfo>) -> Self {
        Self {
            waveform: params.waveform,
            frequency: params.detuned_freq(),
            harmonics: params.harmonics.clone(),
            phase,
            pitch_lfo,
        }
    }
}

impl Synthesizer for OscSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut phase_acc = PhaseAccumulator::new(sample_rate, self.phase);
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                let freq = self.frequency * pitch_factor(&[self.pitch_lfo], t);
                let phase = phase_acc.advance(freq);
                with_harmonics(self.waveform, phase, &self.harmonics)
            })
            .collect()
    }
}

/// Gliding oscillator: frequency follows a sweep across the whole buffer.
#[derive(Debug, Clone)]
pub struct ChirpSynth {
    pub waveform: Waveform,
    pub sweep: FrequencySweep,
    pub vibrato: Option<Lfo>,
    pub harmonics: Vec<Harmonic>,
    pub phase: f64,
    pub pitch_lfo: Option<Lfo>,
}

impl ChirpSynth {
    /// Builds the synth for a `chirp` layer block.
    pub fn from_params(params: &ChirpParams, phase: f64, pitch_lfo: Option<Lfo>) -> Self {
        Self {
            waveform: params.waveform,
            sweep: FrequencySweep::new(params.f_start, params.f_end, params.curve),
            vibrato: Lfo::vibrato(params.vibrato_hz, params.vibrato_depth),
            harmonics: params.harmonics.clone(),
            phase,
            pitch_lfo,
        }
    }

    /// Instantaneous frequency of sample `i`.
    pub fn frequency_at(&self, i: usize, num_samples: usize, sample_rate: f64) -> f64 {
        let t = i as f64 / sample_rate;
        let base = self.sweep.at(sweep_position(i, num_samples));
        base * pitch_factor(&[self.vibrato, self.pitch_lfo], t)
    }
}

impl Synthesizer for ChirpSynth {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut phase_acc = PhaseAccumulator::new(sample_rate, self.phase);
        (0..num_samples)
            .map(|i| {
                let freq = self.frequency_at(i, num_samples, sample_rate);
                let phase = phase_acc.advance(freq);
                with_harmonics(self.waveform, phase, &self.harmonics)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use soundforge_spec::Curve;

    fn zero_crossings(samples: &[f64]) -> usize {
        samples
            .windows(2)
            .filter(|w| w[0] <= 0.0 && w[1] > 0.0)
            .count()
    }

    #[test]
    fn test_osc_frequency() {
        let synth = OscSynth::new(Waveform::Sine, 100.0);
        let samples = synth.synthesize(44100, 44100.0, &mut create_rng(0));
        assert_eq!(samples.len(), 44100);
        // 100 Hz for one second
        let crossings = zero_crossings(&samples);
        assert!((99..=100).contains(&crossings), "{}", crossings);
    }

    #[test]
    fn test_osc_starts_at_layer_phase() {
        let mut synth = OscSynth::new(Waveform::Sine, 440.0);
        synth.phase = std::f64::consts::FRAC_PI_2;
        let samples = synth.synthesize(4, 44100.0, &mut create_rng(0));
        assert_eq!(samples[0], 1.0);
    }

    #[test]
    fn test_osc_detune_from_params() {
        let params = OscParams {
            waveform: Waveform::Saw,
            freq: 440.0,
            detune: 1200.0,
            harmonics: vec![],
        };
        let synth = OscSynth::from_params(&params, 0.0, None);
        assert!((synth.frequency - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_osc_ignores_rng() {
        let synth = OscSynth::new(Waveform::Triangle, 330.0);
        let a = synth.synthesize(512, 22050.0, &mut create_rng(1));
        let b = synth.synthesize(512, 22050.0, &mut create_rng(2));
        assert_eq!(a, b);
    }

    #[test]
    fn test_chirp_endpoints_and_midpoint() {
        let params = ChirpParams {
            waveform: Waveform::Sine,
            f_start: 1600.0,
            f_end: 400.0,
            curve: Curve::Exponential,
            vibrato_hz: 0.0,
            vibrato_depth: 0.0,
            harmonics: vec![],
        };
        let synth = ChirpSynth::from_params(&params, 0.0, None);
        let n = 1001;
        assert_eq!(synth.frequency_at(0, n, 44100.0), 1600.0);
        assert_eq!(synth.frequency_at(n - 1, n, 44100.0), 400.0);
        assert!((synth.frequency_at(500, n, 44100.0) - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_chirp_vibrato_modulates_frequency() {
        let params = ChirpParams {
            waveform: Waveform::Sine,
            f_start: 500.0,
            f_end: 500.0,
            curve: Curve::Linear,
            vibrato_hz: 5.0,
            vibrato_depth: 0.1,
            harmonics: vec![],
        };
        let synth = ChirpSynth::from_params(&params, 0.0, None);
        // sin peaks a quarter period in: t = 0.05 s
        let f = synth.frequency_at(2205, 4410, 44100.0);
        assert!((f - 550.0).abs() < 1e-6);
    }
}
