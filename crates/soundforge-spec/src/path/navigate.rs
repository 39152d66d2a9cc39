//! Recursive navigation from path segments to a mutable leaf.
//!
//! Each function matches the next segment against the fields its node
//! actually has, so the addressable space is exactly the typed tree.

use super::parse::Segment;
use super::{PathError, ParamValue, SetOutcome};
use crate::choice::{Choice, ChoiceSlot, FxType};
use crate::fx::{Fx, FxKind};
use crate::layer::{
    ChirpParams, Envelope, Filter, FmParams, Harmonic, ImpulseParams, Layer, LayerKind, Modulation,
    NoiseParams, OscParams,
};
use crate::ranges::{self, FieldSpec};
use crate::spec::{SoundSpec, ALLOWED_SAMPLE_RATES, MAX_SAMPLES};

/// What kind of value a leaf holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafKind {
    Number,
    Integer,
    Bool,
    Choice,
}

/// A mutable reference to one leaf plus what is needed to check a write.
pub(crate) enum Leaf<'a> {
    Float(&'a mut f64, &'static FieldSpec),
    OptionalFloat(&'a mut Option<f64>, &'static FieldSpec),
    Integer(&'a mut u32, &'static FieldSpec),
    Bool(&'a mut bool),
    Choice(&'a mut dyn ChoiceSlot),
    /// Duration also respects the sample ceiling for the current rate.
    Duration { value: &'a mut f64, sample_rate: u32 },
    SampleRate(&'a mut u32),
}

impl Leaf<'_> {
    pub(crate) fn kind(&self) -> LeafKind {
        match self {
            Leaf::Float(..) | Leaf::OptionalFloat(..) | Leaf::Duration { .. } => LeafKind::Number,
            Leaf::Integer(..) => LeafKind::Integer,
            Leaf::Bool(_) => LeafKind::Bool,
            Leaf::Choice(_) | Leaf::SampleRate(_) => LeafKind::Choice,
        }
    }

    pub(crate) fn read(&self) -> Option<ParamValue> {
        match self {
            Leaf::Float(v, _) => Some(ParamValue::Number(**v)),
            Leaf::OptionalFloat(v, _) => v.map(ParamValue::Number),
            Leaf::Integer(v, _) => Some(ParamValue::Number(f64::from(**v))),
            Leaf::Bool(v) => Some(ParamValue::Bool(**v)),
            Leaf::Choice(slot) => Some(ParamValue::Text(slot.current().to_string())),
            Leaf::Duration { value, .. } => Some(ParamValue::Number(**value)),
            Leaf::SampleRate(v) => Some(ParamValue::Number(f64::from(**v))),
        }
    }

    /// Type-checks, clamps, and stores `value`.
    pub(crate) fn write(self, value: &ParamValue) -> Result<SetOutcome, PathError> {
        match self {
            Leaf::Float(slot, field) => {
                let raw = number(value)?;
                let stored = field.clamp(raw);
                *slot = stored;
                Ok(SetOutcome::number(raw, stored))
            }
            Leaf::OptionalFloat(slot, field) => {
                let raw = number(value)?;
                let stored = field.clamp(raw);
                *slot = Some(stored);
                Ok(SetOutcome::number(raw, stored))
            }
            Leaf::Integer(slot, field) => {
                let raw = integer(value)?;
                let stored = field.clamp(raw);
                *slot = stored as u32;
                Ok(SetOutcome::number(raw, stored))
            }
            Leaf::Bool(slot) => match value {
                ParamValue::Bool(b) => {
                    *slot = *b;
                    Ok(SetOutcome {
                        stored: ParamValue::Bool(*b),
                        clamped: false,
                    })
                }
                other => Err(PathError::TypeMismatch {
                    expected: "bool",
                    found: other.type_name(),
                }),
            },
            Leaf::Choice(slot) => match value {
                ParamValue::Text(s) => {
                    if slot.assign(s) {
                        Ok(SetOutcome {
                            stored: ParamValue::Text(s.clone()),
                            clamped: false,
                        })
                    } else {
                        Err(PathError::InvalidChoice {
                            value: s.clone(),
                            options: slot.options(),
                        })
                    }
                }
                other => Err(PathError::TypeMismatch {
                    expected: "string",
                    found: other.type_name(),
                }),
            },
            Leaf::Duration { value: slot, sample_rate } => {
                let raw = number(value)?;
                let ceiling = MAX_SAMPLES as f64 / f64::from(sample_rate);
                let stored = ranges::DURATION.clamp(raw).min(ceiling);
                *slot = stored;
                Ok(SetOutcome::number(raw, stored))
            }
            Leaf::SampleRate(slot) => {
                // Select controls hand the rate over as text.
                let raw = match value {
                    ParamValue::Text(s) => s.parse::<f64>().map_err(|_| PathError::InvalidChoice {
                        value: s.clone(),
                        options: ranges::SAMPLE_RATE_OPTIONS,
                    })?,
                    other => integer(other)?,
                };
                match ALLOWED_SAMPLE_RATES.iter().find(|&&r| f64::from(r) == raw) {
                    Some(&rate) => {
                        *slot = rate;
                        Ok(SetOutcome::number(raw, raw))
                    }
                    None => Err(PathError::InvalidChoice {
                        value: raw.to_string(),
                        options: ranges::SAMPLE_RATE_OPTIONS,
                    }),
                }
            }
        }
    }
}

fn number(value: &ParamValue) -> Result<f64, PathError> {
    match value {
        ParamValue::Number(v) if v.is_finite() => Ok(*v),
        ParamValue::Number(_) => Err(PathError::TypeMismatch {
            expected: "finite number",
            found: "non-finite number",
        }),
        other => Err(PathError::TypeMismatch {
            expected: "number",
            found: other.type_name(),
        }),
    }
}

fn integer(value: &ParamValue) -> Result<f64, PathError> {
    let v = number(value)?;
    if v.fract() != 0.0 {
        return Err(PathError::TypeMismatch {
            expected: "integer",
            found: "fractional number",
        });
    }
    Ok(v)
}

fn expect_field(segments: &[Segment]) -> Result<(&str, &[Segment]), PathError> {
    match segments.split_first() {
        None => Err(PathError::NotALeaf),
        Some((Segment::Field(name), rest)) => Ok((name.as_str(), rest)),
        Some((Segment::Index(i), _)) => Err(PathError::UnexpectedIndex(*i)),
    }
}

fn expect_index<'s>(
    list: &str,
    segments: &'s [Segment],
) -> Result<(usize, &'s [Segment]), PathError> {
    match segments.split_first() {
        None => Err(PathError::NotALeaf),
        Some((Segment::Index(i), rest)) => Ok((*i, rest)),
        Some((Segment::Field(_), _)) => Err(PathError::ExpectedIndex(list.to_string())),
    }
}

/// Accepts `leaf` only if no segments remain.
fn end<'a>(rest: &[Segment], leaf: Leaf<'a>) -> Result<Leaf<'a>, PathError> {
    match rest.first() {
        None => Ok(leaf),
        Some(Segment::Field(name)) => Err(PathError::UnknownField(name.clone())),
        Some(Segment::Index(i)) => Err(PathError::UnexpectedIndex(*i)),
    }
}

fn unknown(name: &str) -> PathError {
    PathError::UnknownField(name.to_string())
}

fn choice<T: Choice>(slot: &mut T) -> Leaf<'_> {
    Leaf::Choice(slot)
}

fn nth<'a, T>(items: &'a mut [T], index: usize) -> Result<&'a mut T, PathError> {
    let len = items.len();
    items
        .get_mut(index)
        .ok_or(PathError::IndexOutOfBounds { index, len })
}

pub(crate) fn resolve<'a>(
    spec: &'a mut SoundSpec,
    segments: &[Segment],
) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    match name {
        "duration" => end(
            rest,
            Leaf::Duration {
                sample_rate: spec.sample_rate,
                value: &mut spec.duration,
            },
        ),
        "sample_rate" => end(rest, Leaf::SampleRate(&mut spec.sample_rate)),
        "seed" => end(rest, Leaf::Integer(&mut spec.seed, &ranges::SEED)),
        "global" => {
            let (field, rest) = expect_field(rest)?;
            match field {
                "amp" => end(rest, Leaf::Float(&mut spec.global.amp, &ranges::GLOBAL_AMP)),
                "normalize" => end(rest, Leaf::Bool(&mut spec.global.normalize)),
                other => Err(unknown(other)),
            }
        }
        "layers" => {
            let (index, rest) = expect_index(name, rest)?;
            resolve_layer(nth(&mut spec.layers, index)?, rest)
        }
        "layers_by_id" => {
            let (id, rest) = expect_field(rest)?;
            let layer = spec
                .layers
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| PathError::LayerNotFound(id.to_string()))?;
            resolve_layer(layer, rest)
        }
        "fx_chain" | "fx" => {
            let (index, rest) = expect_index(name, rest)?;
            resolve_fx(nth(&mut spec.fx_chain, index)?, rest)
        }
        "fx_by_type" => {
            let (key, rest) = expect_field(rest)?;
            let fx_type = FxType::parse(key).ok_or_else(|| PathError::InvalidChoice {
                value: key.to_string(),
                options: FxType::NAMES,
            })?;
            let fx = spec
                .fx_chain
                .iter_mut()
                .find(|fx| fx.fx_type() == fx_type)
                .ok_or(PathError::EffectNotFound(fx_type))?;
            resolve_fx(fx, rest)
        }
        other => Err(unknown(other)),
    }
}

fn resolve_layer<'a>(layer: &'a mut Layer, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    match name {
        "amp" => end(rest, Leaf::Float(&mut layer.amp, &ranges::LAYER_AMP)),
        "pan" => end(rest, Leaf::Float(&mut layer.pan, &ranges::LAYER_PAN)),
        "phase" => end(rest, Leaf::Float(&mut layer.phase, &ranges::LAYER_PHASE)),
        "env" => resolve_envelope(&mut layer.env, rest),
        // An absent block behaves as all-zero modulation; writing creates it.
        "mod" => resolve_modulation(layer.modulation.get_or_insert_with(Modulation::default), rest),
        "filter" => {
            let (index, rest) = expect_index(name, rest)?;
            resolve_filter(nth(&mut layer.filters, index)?, rest)
        }
        "osc" | "chirp" | "fm" | "noise" | "impulse" => {
            let layer_type = layer.kind.layer_type();
            match (&mut layer.kind, name) {
                (LayerKind::Osc(p), "osc") => resolve_osc(p, rest),
                (LayerKind::Chirp(p), "chirp") => resolve_chirp(p, rest),
                (LayerKind::Fm(p), "fm") => resolve_fm(p, rest),
                (LayerKind::Noise(p), "noise") => resolve_noise(p, rest),
                (LayerKind::Impulse(p), "impulse") => resolve_impulse(p, rest),
                _ => Err(PathError::BlockMismatch {
                    block: name.to_string(),
                    layer_type,
                }),
            }
        }
        other => Err(unknown(other)),
    }
}

fn resolve_envelope<'a>(env: &'a mut Envelope, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "attack" => Leaf::Float(&mut env.attack, &ranges::ENV_ATTACK),
        "decay" => Leaf::Float(&mut env.decay, &ranges::ENV_DECAY),
        "sustain" => Leaf::OptionalFloat(&mut env.sustain, &ranges::ENV_SUSTAIN),
        "release" => Leaf::OptionalFloat(&mut env.release, &ranges::ENV_RELEASE),
        "shape" => choice(&mut env.shape),
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_modulation<'a>(
    m: &'a mut Modulation,
    segments: &[Segment],
) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "tremolo_hz" => Leaf::Float(&mut m.tremolo_hz, &ranges::MOD_TREMOLO_HZ),
        "tremolo_depth" => Leaf::Float(&mut m.tremolo_depth, &ranges::MOD_TREMOLO_DEPTH),
        "pitch_lfo_hz" => Leaf::Float(&mut m.pitch_lfo_hz, &ranges::MOD_PITCH_LFO_HZ),
        "pitch_lfo_depth" => Leaf::Float(&mut m.pitch_lfo_depth, &ranges::MOD_PITCH_LFO_DEPTH),
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_filter<'a>(f: &'a mut Filter, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "type" => choice(&mut f.filter_type),
        "cutoff" => Leaf::Float(&mut f.cutoff, &ranges::FILTER_CUTOFF),
        "cutoff_end" => Leaf::OptionalFloat(&mut f.cutoff_end, &ranges::FILTER_CUTOFF_END),
        "q" => Leaf::Float(&mut f.q, &ranges::FILTER_Q),
        "curve" => choice(&mut f.curve),
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_harmonic<'a>(
    harmonics: &'a mut [Harmonic],
    segments: &[Segment],
    (mul, amp): (&'static FieldSpec, &'static FieldSpec),
) -> Result<Leaf<'a>, PathError> {
    let (index, rest) = expect_index("harmonics", segments)?;
    let h = nth(harmonics, index)?;
    let (name, rest) = expect_field(rest)?;
    let leaf = match name {
        "mul" => Leaf::Float(&mut h.mul, mul),
        "amp" => Leaf::Float(&mut h.amp, amp),
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_osc<'a>(p: &'a mut OscParams, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "waveform" => choice(&mut p.waveform),
        "freq" => Leaf::Float(&mut p.freq, &ranges::OSC_FREQ),
        "detune" => Leaf::Float(&mut p.detune, &ranges::OSC_DETUNE),
        "harmonics" => {
            return resolve_harmonic(
                &mut p.harmonics,
                rest,
                (&ranges::OSC_HARMONIC_MUL, &ranges::OSC_HARMONIC_AMP),
            )
        }
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_chirp<'a>(p: &'a mut ChirpParams, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "waveform" => choice(&mut p.waveform),
        "f_start" => Leaf::Float(&mut p.f_start, &ranges::CHIRP_F_START),
        "f_end" => Leaf::Float(&mut p.f_end, &ranges::CHIRP_F_END),
        "curve" => choice(&mut p.curve),
        "vibrato_hz" => Leaf::Float(&mut p.vibrato_hz, &ranges::CHIRP_VIBRATO_HZ),
        "vibrato_depth" => Leaf::Float(&mut p.vibrato_depth, &ranges::CHIRP_VIBRATO_DEPTH),
        "harmonics" => {
            return resolve_harmonic(
                &mut p.harmonics,
                rest,
                (&ranges::CHIRP_HARMONIC_MUL, &ranges::CHIRP_HARMONIC_AMP),
            )
        }
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_fm<'a>(p: &'a mut FmParams, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "carrier_freq" => Leaf::Float(&mut p.carrier_freq, &ranges::FM_CARRIER_FREQ),
        "mod_freq" => Leaf::Float(&mut p.mod_freq, &ranges::FM_MOD_FREQ),
        "index" => Leaf::Float(&mut p.index, &ranges::FM_INDEX),
        "brightness" => Leaf::Float(&mut p.brightness, &ranges::FM_BRIGHTNESS),
        "waveform" => choice(&mut p.waveform),
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_noise<'a>(p: &'a mut NoiseParams, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "color" => choice(&mut p.color),
        "cutoff_start" => Leaf::OptionalFloat(&mut p.cutoff_start, &ranges::NOISE_CUTOFF_START),
        "cutoff_end" => Leaf::OptionalFloat(&mut p.cutoff_end, &ranges::NOISE_CUTOFF_END),
        "cutoff_curve" => choice(&mut p.cutoff_curve),
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_impulse<'a>(
    p: &'a mut ImpulseParams,
    segments: &[Segment],
) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    let leaf = match name {
        "kind" => choice(&mut p.kind),
        "width" => Leaf::Float(&mut p.width, &ranges::IMPULSE_WIDTH),
        "tone_freq" => Leaf::OptionalFloat(&mut p.tone_freq, &ranges::IMPULSE_TONE_FREQ),
        other => return Err(unknown(other)),
    };
    end(rest, leaf)
}

fn resolve_fx<'a>(fx: &'a mut Fx, segments: &[Segment]) -> Result<Leaf<'a>, PathError> {
    let (name, rest) = expect_field(segments)?;
    match name {
        "enabled" => end(rest, Leaf::Bool(&mut fx.enabled)),
        "params" => {
            let (param, rest) = expect_field(rest)?;
            let fx_type = fx.fx_type();
            let leaf = match (&mut fx.kind, param) {
                (FxKind::Softclip { drive }, "drive") => Leaf::Float(drive, &ranges::FX_DRIVE),
                (FxKind::Bitcrush { steps, .. }, "steps") => Leaf::Integer(steps, &ranges::FX_STEPS),
                (FxKind::Bitcrush { hold_samples, .. }, "hold_samples") => {
                    Leaf::Integer(hold_samples, &ranges::FX_HOLD_SAMPLES)
                }
                (FxKind::Delay { time_ms, .. }, "time_ms") => Leaf::Float(time_ms, &ranges::FX_TIME_MS),
                (FxKind::Delay { feedback, .. }, "feedback") => {
                    Leaf::Float(feedback, &ranges::FX_FEEDBACK)
                }
                (FxKind::Delay { mix, .. }, "mix") => Leaf::Float(mix, &ranges::FX_MIX),
                (FxKind::Normalize { target_peak }, "target_peak") => {
                    Leaf::Float(target_peak, &ranges::FX_TARGET_PEAK)
                }
                _ => {
                    return Err(PathError::FxParamMismatch {
                        param: param.to_string(),
                        fx_type,
                    })
                }
            };
            end(rest, leaf)
        }
        other => Err(unknown(other)),
    }
}
