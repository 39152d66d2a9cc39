//! Amplitude envelopes.
//!
//! An envelope spans the whole buffer, `T = (n − 1)/sr` seconds. When the
//! declared segments do not fit in `T` they are all scaled down by the same
//! factor.

use soundforge_spec::{Envelope, EnvelopeShape};

/// Segment lengths after fitting to the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeTimes {
    pub attack: f64,
    pub decay: f64,
    /// Zero unless the shape is ADSR.
    pub release: f64,
    pub sustain: f64,
    /// Time of the last sample.
    pub span: f64,
}

impl EnvelopeTimes {
    /// Fits the envelope's segments into a buffer of `num_samples`.
    pub fn fit(env: &Envelope, num_samples: usize, sample_rate: f64) -> Self {
        let span = num_samples.saturating_sub(1) as f64 / sample_rate;
        let (release, sustain) = match env.shape {
            EnvelopeShape::Adsr => (env.release_time(), env.sustain_level()),
            EnvelopeShape::Exp | EnvelopeShape::Lin => (0.0, 0.0),
        };
        let total = env.attack + env.decay + release;
        let scale = if total > span && total > 0.0 {
            span / total
        } else {
            1.0
        };

        Self {
            attack: env.attack * scale,
            decay: env.decay * scale,
            release: release * scale,
            sustain,
            span,
        }
    }
}

/// Envelope level at time `t`.
pub fn level_at(shape: EnvelopeShape, times: &EnvelopeTimes, t: f64) -> f64 {
    let EnvelopeTimes {
        attack,
        decay,
        release,
        sustain,
        span,
    } = *times;

    if t < attack {
        return t / attack;
    }
    let since = t - attack;

    match shape {
        EnvelopeShape::Exp => {
            if decay > 0.0 {
                (-since / decay).exp()
            } else if since > 0.0 {
                0.0
            } else {
                1.0
            }
        }
        EnvelopeShape::Lin => {
            if since >= decay {
                0.0
            } else {
                1.0 - since / decay
            }
        }
        EnvelopeShape::Adsr => {
            let release_start = span - release;
            if t >= span {
                0.0
            } else if t >= release_start && release > 0.0 {
                (sustain * (1.0 - (t - release_start) / release)).max(0.0)
            } else if since < decay {
                1.0 - (1.0 - sustain) * since / decay
            } else {
                sustain
            }
        }
    }
}

/// Per-sample envelope multipliers for a buffer of `num_samples`.
pub fn generate_envelope(env: &Envelope, num_samples: usize, sample_rate: f64) -> Vec<f64> {
    let times = EnvelopeTimes::fit(env, num_samples, sample_rate);
    (0..num_samples)
        .map(|i| level_at(env.shape, &times, i as f64 / sample_rate))
        .collect()
}

/// Multiplies `samples` by the envelope in place.
pub fn apply_envelope(samples: &mut [f64], env: &Envelope, sample_rate: f64) {
    let curve = generate_envelope(env, samples.len(), sample_rate);
    for (sample, gain) in samples.iter_mut().zip(curve) {
        *sample *= gain;
    }
}
