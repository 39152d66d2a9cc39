//! Post-mix effects.
//!
//! Effects run on the mixed mono buffer in declared order. Every effect keeps
//! the buffer length; none of them draws from the random stream.

pub mod delay;
pub mod distortion;

use soundforge_spec::{Fx, FxKind};
use tracing::trace;

use crate::mixer::normalize_to_peak;

/// Applies one effect in place.
pub fn apply_effect(samples: &mut [f64], kind: &FxKind, sample_rate: f64) {
    match *kind {
        FxKind::Softclip { drive } => distortion::apply_softclip(samples, drive),
        FxKind::Bitcrush {
            steps,
            hold_samples,
        } => distortion::apply_bitcrush(samples, steps, hold_samples),
        FxKind::Delay {
            time_ms,
            feedback,
            mix,
        } => delay::apply(samples, time_ms, feedback, mix, sample_rate),
        FxKind::Normalize { target_peak } => normalize_to_peak(samples, target_peak),
    }
}

/// Applies a chain of effects to mixed audio, skipping disabled entries.
pub fn apply_effect_chain(samples: &mut [f64], chain: &[Fx], sample_rate: f64) {
    for (index, fx) in chain.iter().enumerate() {
        if !fx.enabled {
            trace!(index, fx = %fx.fx_type(), "skipping disabled effect");
            continue;
        }
        trace!(index, fx = %fx.fx_type(), "applying effect");
        apply_effect(samples, &fx.kind, sample_rate);
    }
}
