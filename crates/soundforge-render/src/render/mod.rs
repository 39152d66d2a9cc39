//! Main entry point for rendering.
//!
//! Turns a validated [`SoundSpec`] into a mono buffer of
//! `round(sample_rate · duration)` samples in [-1, 1]. The output is a pure
//! function of the spec: one PCG32 stream seeded from `spec.seed` feeds every
//! random draw, layers first in declared order, then the FX chain.

mod layer;


use soundforge_spec::{validate_spec, SoundSpec, NORMALIZE_CEILING};
use tracing::debug;

use crate::effects::apply_effect_chain;
use crate::error::{RenderError, RenderResult};
use crate::mixer::{hard_clip_buffer, normalize_to_peak, MixLayer, Mixer};
use crate::rng::create_rng;
use crate::wav::WavResult;

pub use layer::{render_layer, synthesizer_for};

/// Renders a validated spec to mono samples.
///
/// The spec is trusted; use [`try_render`] after editing fields directly.
pub fn render(spec: &SoundSpec) -> Vec<f64> {
    let num_samples = spec.num_samples();
    let sample_rate = f64::from(spec.sample_rate);
    let mut rng = create_rng(spec.seed);

    debug!(
        name = %spec.name,
        num_samples,
        sample_rate = spec.sample_rate,
        seed = spec.seed,
        "rendering"
    );

    let mut mixer = Mixer::new(num_samples);
    for layer in &spec.layers {
        debug!(layer = %layer.id, kind = %layer.layer_type(), "rendering layer");
        let samples = render_layer(layer, num_samples, sample_rate, &mut rng);
        mixer.add_layer(&MixLayer::new(samples, layer.amp, layer.pan));
    }

    let mut samples = mixer.mix(spec.global.amp);
    apply_effect_chain(&mut samples, &spec.fx_chain, sample_rate);

    if spec.global.normalize {
        normalize_to_peak(&mut samples, NORMALIZE_CEILING);
    }
    hard_clip_buffer(&mut samples);

    samples
}

/// Re-validates the spec, then renders it.
pub fn try_render(spec: &SoundSpec) -> RenderResult<Vec<f64>> {
    let result = validate_spec(spec);
    if !result.is_ok() {
        return Err(RenderError::InvalidSpec(result));
    }
    Ok(render(spec))
}

/// Renders a validated spec and encodes it as 16-bit mono WAV.
pub fn render_wav(spec: &SoundSpec) -> WavResult {
    WavResult::from_samples(&render(spec), spec.sample_rate)
}
