//! Layer validation: shape, discriminated union, and ranges.

use serde_json::Value;

use crate::choice::{Choice, EnvelopeShape, LayerType};
use crate::error::{ErrorCode, ValidationResult, ValidationWarning, WarningCode};
use crate::layer::{
    ChirpParams, Envelope, Filter, FmParams, Harmonic, ImpulseParams, Layer, Modulation, NoiseParams,
    OscParams,
};
use crate::ranges::{self, FieldSpec};
use crate::wire::LayerDoc;

use super::common::{
    check_count, check_identifier, check_number, check_optional, decode, join, Fields, Reported,
};

const LAYER_KEYS: &[&str] = &[
    "id", "type", "amp", "pan", "phase", "env", "mod", "filter", "osc", "chirp", "fm", "noise",
    "impulse",
];

/// Validates one layer at `path` (`layers[i]`).
///
/// Returns the typed layer whenever its shape is sound, even if range
/// errors were reported, so later checks can still run against it.
pub fn validate_layer(result: &mut ValidationResult, path: &str, value: Value) -> Option<Layer> {
    let mut fields = Fields::open(result, path, value, LAYER_KEYS)?;

    let id: Option<String> = fields.required(result, "id");
    if let Some(id) = &id {
        check_identifier(result, &ranges::LAYER_ID, &fields.child("id"), id);
    }
    let layer_type: Option<LayerType> = fields.required(result, "type");

    let amp: Option<f64> = fields.required(result, "amp");
    if let Some(amp) = amp {
        check_number(result, &ranges::LAYER_AMP, &fields.child("amp"), amp);
    }
    let pan = fields.optional::<f64>(result, "pan");
    if let Ok(Some(pan)) = pan {
        check_number(result, &ranges::LAYER_PAN, &fields.child("pan"), pan);
    }
    let phase = fields.optional::<f64>(result, "phase");
    if let Ok(Some(phase)) = phase {
        check_number(result, &ranges::LAYER_PHASE, &fields.child("phase"), phase);
    }

    let env: Option<Envelope> = fields.required(result, "env");
    if let Some(env) = &env {
        check_envelope(result, &fields.child("env"), env);
    }

    let modulation = fields.optional::<Modulation>(result, "mod");
    if let Ok(Some(m)) = &modulation {
        check_modulation(result, &fields.child("mod"), m);
    }

    let filters = fields
        .optional::<Vec<Value>>(result, "filter")
        .map(|list| validate_filters(result, &fields.child("filter"), list.unwrap_or_default()));

    // Parameter blocks
    let osc = fields.optional::<OscParams>(result, "osc");
    let chirp = fields.optional::<ChirpParams>(result, "chirp");
    let fm = fields.optional::<FmParams>(result, "fm");
    let noise = fields.optional::<NoiseParams>(result, "noise");
    let impulse = fields.optional::<ImpulseParams>(result, "impulse");
    let block_failed = osc.is_err()
        || chirp.is_err()
        || fm.is_err()
        || noise.is_err()
        || impulse.is_err();

    // Range-check the block the type selects (every block when the type is
    // unreadable), independent of whether the rest of the layer assembled.
    let checks = |t: LayerType| layer_type.map_or(true, |lt| lt == t);
    if let (Ok(Some(p)), true) = (&osc, checks(LayerType::Osc)) {
        check_osc(result, &fields.child("osc"), p);
    }
    if let (Ok(Some(p)), true) = (&chirp, checks(LayerType::Chirp)) {
        check_chirp(result, &fields.child("chirp"), p);
    }
    if let (Ok(Some(p)), true) = (&fm, checks(LayerType::Fm)) {
        check_fm(result, &fields.child("fm"), p);
    }
    if let (Ok(Some(p)), true) = (&noise, checks(LayerType::Noise)) {
        check_noise(result, &fields.child("noise"), p);
    }
    if let (Ok(Some(p)), true) = (&impulse, checks(LayerType::Impulse)) {
        check_impulse(result, &fields.child("impulse"), p);
    }

    let mut doc = LayerDoc {
        id: id?,
        layer_type: layer_type?,
        amp: amp?,
        pan: pan.ok()?.unwrap_or(0.0),
        phase: phase.ok()?.unwrap_or(0.0),
        env: env?,
        modulation: modulation.ok()?,
        filter: Some(filters.ok()??),
        osc: osc.unwrap_or(None),
        chirp: chirp.unwrap_or(None),
        fm: fm.unwrap_or(None),
        noise: noise.unwrap_or(None),
        impulse: impulse.unwrap_or(None),
    };

    for block in doc.populated_blocks() {
        if block != doc.layer_type {
            result.error(
                ErrorCode::UnionMismatch,
                join(path, block.as_str()),
                format!(
                    "`{}` block does not match layer type `{}`",
                    block, doc.layer_type
                ),
            );
        }
    }

    let kind = match doc.take_kind() {
        Some(kind) => kind,
        None => {
            if !block_failed {
                result.error(
                    ErrorCode::UnionMismatch,
                    path,
                    format!(
                        "layer of type `{0}` requires a `{0}` block",
                        doc.layer_type
                    ),
                );
            }
            return None;
        }
    };

    Some(Layer {
        id: doc.id,
        amp: doc.amp,
        pan: doc.pan,
        phase: doc.phase,
        env: doc.env,
        modulation: doc.modulation,
        filters: doc.filter.unwrap_or_default(),
        kind,
    })
}

fn check_envelope(result: &mut ValidationResult, path: &str, env: &Envelope) {
    check_number(result, &ranges::ENV_ATTACK, &join(path, "attack"), env.attack);
    check_number(result, &ranges::ENV_DECAY, &join(path, "decay"), env.decay);
    check_optional(result, &ranges::ENV_SUSTAIN, &join(path, "sustain"), env.sustain);
    check_optional(result, &ranges::ENV_RELEASE, &join(path, "release"), env.release);

    if env.shape != EnvelopeShape::Adsr {
        for (name, set) in [("sustain", env.sustain.is_some()), ("release", env.release.is_some())] {
            if set {
                result.add_warning(ValidationWarning::new(
                    WarningCode::IgnoredField,
                    join(path, name),
                    format!("`{}` only applies to the adsr shape", name),
                ));
            }
        }
    }
}

fn check_modulation(result: &mut ValidationResult, path: &str, m: &Modulation) {
    let checks: [(&FieldSpec, f64); 4] = [
        (&ranges::MOD_TREMOLO_HZ, m.tremolo_hz),
        (&ranges::MOD_TREMOLO_DEPTH, m.tremolo_depth),
        (&ranges::MOD_PITCH_LFO_HZ, m.pitch_lfo_hz),
        (&ranges::MOD_PITCH_LFO_DEPTH, m.pitch_lfo_depth),
    ];
    for (field, value) in checks {
        check_number(result, field, &join(path, field.name()), value);
    }
}

/// Validates each filter at its own index. `None` if any entry is malformed.
fn validate_filters(
    result: &mut ValidationResult,
    path: &str,
    list: Vec<Value>,
) -> Option<Vec<Filter>> {
    check_count(result, &ranges::FILTERS, path, list.len());

    let mut filters = Some(Vec::with_capacity(list.len()));
    for (i, value) in list.into_iter().enumerate() {
        let item_path = format!("{}[{}]", path, i);
        match decode::<Filter>(result, &item_path, value) {
            Ok(filter) => {
                check_filter(result, &item_path, &filter);
                if let Some(filters) = filters.as_mut() {
                    filters.push(filter);
                }
            }
            Err(Reported) => filters = None,
        }
    }
    filters
}

fn check_filter(result: &mut ValidationResult, path: &str, f: &Filter) {
    check_number(result, &ranges::FILTER_CUTOFF, &join(path, "cutoff"), f.cutoff);
    check_optional(
        result,
        &ranges::FILTER_CUTOFF_END,
        &join(path, "cutoff_end"),
        f.cutoff_end,
    );
    check_number(result, &ranges::FILTER_Q, &join(path, "q"), f.q);
}

fn check_harmonics(
    result: &mut ValidationResult,
    path: &str,
    harmonics: &[Harmonic],
    (list, mul, amp): (&FieldSpec, &FieldSpec, &FieldSpec),
) {
    check_count(result, list, path, harmonics.len());
    for (i, h) in harmonics.iter().enumerate() {
        let item = format!("{}[{}]", path, i);
        check_number(result, mul, &join(&item, "mul"), h.mul);
        check_number(result, amp, &join(&item, "amp"), h.amp);
    }
}

fn check_osc(result: &mut ValidationResult, path: &str, p: &OscParams) {
    check_number(result, &ranges::OSC_FREQ, &join(path, "freq"), p.freq);
    check_number(result, &ranges::OSC_DETUNE, &join(path, "detune"), p.detune);
    check_harmonics(
        result,
        &join(path, "harmonics"),
        &p.harmonics,
        (
            &ranges::OSC_HARMONICS,
            &ranges::OSC_HARMONIC_MUL,
            &ranges::OSC_HARMONIC_AMP,
        ),
    );
}

fn check_chirp(result: &mut ValidationResult, path: &str, p: &ChirpParams) {
    check_number(result, &ranges::CHIRP_F_START, &join(path, "f_start"), p.f_start);
    check_number(result, &ranges::CHIRP_F_END, &join(path, "f_end"), p.f_end);
    check_number(result, &ranges::CHIRP_VIBRATO_HZ, &join(path, "vibrato_hz"), p.vibrato_hz);
    check_number(
        result,
        &ranges::CHIRP_VIBRATO_DEPTH,
        &join(path, "vibrato_depth"),
        p.vibrato_depth,
    );
    check_harmonics(
        result,
        &join(path, "harmonics"),
        &p.harmonics,
        (
            &ranges::CHIRP_HARMONICS,
            &ranges::CHIRP_HARMONIC_MUL,
            &ranges::CHIRP_HARMONIC_AMP,
        ),
    );
}

fn check_fm(result: &mut ValidationResult, path: &str, p: &FmParams) {
    check_number(result, &ranges::FM_CARRIER_FREQ, &join(path, "carrier_freq"), p.carrier_freq);
    check_number(result, &ranges::FM_MOD_FREQ, &join(path, "mod_freq"), p.mod_freq);
    check_number(result, &ranges::FM_INDEX, &join(path, "index"), p.index);
    check_number(result, &ranges::FM_BRIGHTNESS, &join(path, "brightness"), p.brightness);
}

fn check_noise(result: &mut ValidationResult, path: &str, p: &NoiseParams) {
    check_optional(result, &ranges::NOISE_CUTOFF_START, &join(path, "cutoff_start"), p.cutoff_start);
    check_optional(result, &ranges::NOISE_CUTOFF_END, &join(path, "cutoff_end"), p.cutoff_end);
    if p.cutoff_start.is_none() && p.cutoff_end.is_some() {
        result.add_warning(ValidationWarning::new(
            WarningCode::IgnoredField,
            join(path, "cutoff_end"),
            "`cutoff_end` has no effect without `cutoff_start`",
        ));
    }
}

fn check_impulse(result: &mut ValidationResult, path: &str, p: &ImpulseParams) {
    check_number(result, &ranges::IMPULSE_WIDTH, &join(path, "width"), p.width);
    check_optional(result, &ranges::IMPULSE_TONE_FREQ, &join(path, "tone_freq"), p.tone_freq);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn osc_layer() -> Value {
        json!({
            "id": "main",
            "type": "osc",
            "amp": 0.5,
            "env": {"attack": 0.01, "decay": 0.2},
            "osc": {"waveform": "sine", "freq": 440.0}
        })
    }

    fn validate(value: Value) -> (Option<Layer>, ValidationResult) {
        let mut result = ValidationResult::success();
        let layer = validate_layer(&mut result, "layers[0]", value);
        (layer, result)
    }

    #[test]
    fn test_valid_osc_layer() {
        let (layer, result) = validate(osc_layer());
        assert!(result.is_ok(), "{}", result);
        let layer = layer.unwrap();
        assert_eq!(layer.id, "main");
        assert_eq!(layer.pan, 0.0);
        assert!(layer.filters.is_empty());
        assert!(matches!(layer.kind, crate::layer::LayerKind::Osc(_)));
    }

    #[test]
    fn test_mismatched_block_rejected() {
        let mut value = osc_layer();
        value["type"] = json!("chirp");
        let (layer, result) = validate(value);
        assert!(layer.is_none());
        assert_eq!(
            result.field_errors(),
            vec![
                ("layers[0].osc", "`osc` block does not match layer type `chirp`"),
                ("layers[0]", "layer of type `chirp` requires a `chirp` block"),
            ]
        );
        assert!(result.errors.iter().all(|e| e.code == ErrorCode::UnionMismatch));
    }

    #[test]
    fn test_extra_block_rejected() {
        let mut value = osc_layer();
        value["noise"] = json!({"color": "white"});
        let (_, result) = validate(value);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "layers[0].noise");
        assert_eq!(result.errors[0].code, ErrorCode::UnionMismatch);
    }

    #[test]
    fn test_missing_block_rejected() {
        let mut value = osc_layer();
        value.as_object_mut().unwrap().remove("osc");
        let (layer, result) = validate(value);
        assert!(layer.is_none());
        assert!(result.has_code(ErrorCode::UnionMismatch));
    }

    #[test]
    fn test_out_of_range_is_reported_not_clamped() {
        let mut value = osc_layer();
        value["amp"] = json!(1.5);
        value["osc"]["freq"] = json!(5.0);
        let (layer, result) = validate(value);
        assert_eq!(layer.unwrap().amp, 1.5);
        assert_eq!(
            result.errors.iter().map(|e| e.path.as_str()).collect::<Vec<_>>(),
            vec!["layers[0].amp", "layers[0].osc.freq"]
        );
        assert!(result.errors.iter().all(|e| e.code == ErrorCode::OutOfRange));
    }

    #[test]
    fn test_range_errors_survive_missing_fields() {
        let mut value = osc_layer();
        value.as_object_mut().unwrap().remove("id");
        value["osc"]["freq"] = json!(50_000.0);
        let (layer, result) = validate(value);
        assert!(layer.is_none());
        assert_eq!(
            result.errors.iter().map(|e| e.path.as_str()).collect::<Vec<_>>(),
            vec!["layers[0].id", "layers[0].osc.freq"]
        );
    }

    #[test]
    fn test_bad_filter_reported_at_index() {
        let mut value = osc_layer();
        value["filter"] = json!([
            {"type": "lp1", "cutoff": 1000.0},
            {"type": "comb", "cutoff": 1000.0}
        ]);
        let (layer, result) = validate(value);
        assert!(layer.is_none());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "layers[0].filter[1]");
        assert_eq!(result.errors[0].code, ErrorCode::MalformedJson);
    }

    #[test]
    fn test_too_many_filters() {
        let mut value = osc_layer();
        value["filter"] = Value::Array(vec![json!({"type": "lp1", "cutoff": 1000.0}); 5]);
        let (_, result) = validate(value);
        assert!(result.has_code(ErrorCode::ListLength));
        assert!(result.has_error_at("layers[0].filter"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut value = osc_layer();
        value["id"] = json!("");
        let (_, result) = validate(value);
        assert!(result.has_code(ErrorCode::EmptyIdentifier));
    }

    #[test]
    fn test_unknown_block_field_rejected() {
        let mut value = osc_layer();
        value["osc"]["gain"] = json!(1.0);
        let (_, result) = validate(value);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "layers[0].osc");
    }

    #[test]
    fn test_adsr_only_fields_warn() {
        let mut value = osc_layer();
        value["env"]["sustain"] = json!(0.4);
        let (layer, result) = validate(value);
        assert!(layer.is_some());
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].path, "layers[0].env.sustain");
    }

    #[test]
    fn test_fm_waveform_only_sine() {
        let value = json!({
            "id": "bell",
            "type": "fm",
            "amp": 0.5,
            "env": {"attack": 0.0, "decay": 0.5},
            "fm": {"carrier_freq": 440.0, "mod_freq": 220.0, "index": 2.0, "waveform": "square"}
        });
        let (layer, result) = validate(value);
        assert!(layer.is_none());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "layers[0].fm");
    }
}
