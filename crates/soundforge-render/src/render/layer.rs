//! Layer rendering and synthesis dispatching.

use rand_pcg::Pcg32;
use soundforge_spec::{Layer, LayerKind};

use crate::envelope::apply_envelope;
use crate::filter::apply_filters;
use crate::modulation::{apply_tremolo, Lfo};
use crate::synthesis::fm::FmSynth;
use crate::synthesis::impulse::ImpulseSynth;
use crate::synthesis::noise::NoiseSynth;
use crate::synthesis::oscillators::{ChirpSynth, OscSynth};
use crate::synthesis::Synthesizer;

/// Builds the generator for a layer's parameter block.
pub fn synthesizer_for(layer: &Layer) -> Box<dyn Synthesizer> {
    let pitch_lfo = Lfo::pitch(layer.modulation.as_ref());
    match &layer.kind {
        LayerKind::Osc(params) => Box::new(OscSynth::from_params(params, layer.phase, pitch_lfo)),
        LayerKind::Chirp(params) => {
            Box::new(ChirpSynth::from_params(params, layer.phase, pitch_lfo))
        }
        LayerKind::Fm(params) => Box::new(FmSynth::from_params(params, layer.phase, pitch_lfo)),
        LayerKind::Noise(params) => Box::new(NoiseSynth::from_params(params)),
        LayerKind::Impulse(params) => Box::new(ImpulseSynth::from_params(params)),
    }
}

/// Renders one layer before mixing: generate, tremolo, filters, envelope.
///
/// Amp and pan are applied by the mixer.
pub fn render_layer(
    layer: &Layer,
    num_samples: usize,
    sample_rate: f64,
    rng: &mut Pcg32,
) -> Vec<f64> {
    let mut samples = synthesizer_for(layer).synthesize(num_samples, sample_rate, rng);

    if let Some(modulation) = &layer.modulation {
        apply_tremolo(&mut samples, modulation, sample_rate);
    }
    apply_filters(&mut samples, &layer.filters, sample_rate);
    apply_envelope(&mut samples, &layer.env, sample_rate);

    samples
}
