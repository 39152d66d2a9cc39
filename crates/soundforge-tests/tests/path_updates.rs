//! Path edits followed by rendering.

use pretty_assertions::assert_eq;
use soundforge_render::{render, render_wav, try_render};
use soundforge_spec::{path, validate_spec, ParamValue, PathError};
use soundforge_tests::fixtures::{kitchen_sink, load};

#[test]
fn clamped_update_keeps_spec_renderable() {
    let mut spec = load(&kitchen_sink());

    let outcome = path::set(&mut spec, "layers_by_id.osc.amp", 9.0).unwrap();
    assert!(outcome.clamped);
    assert_eq!(outcome.stored, ParamValue::Number(1.0));

    let outcome = path::set(&mut spec, "fx_chain[2].params.feedback", -1.0).unwrap();
    assert_eq!(outcome.stored, ParamValue::Number(0.0));

    assert!(validate_spec(&spec).is_ok());
    assert!(try_render(&spec).is_ok());
}

#[test]
fn failed_update_leaves_output_unchanged() {
    let mut spec = load(&kitchen_sink());
    let before = render_wav(&spec).pcm_hash;

    assert!(matches!(
        path::set(&mut spec, "layers_by_id.missing.amp", 0.5),
        Err(PathError::LayerNotFound(_))
    ));
    assert!(path::set(&mut spec, "layers_by_id.osc.chirp.f_end", 300.0).is_err());
    assert!(!path::update(&mut spec, "global.amp", "loud"));

    assert_eq!(render_wav(&spec).pcm_hash, before);
}

#[test]
fn duration_update_changes_length() {
    let mut spec = load(&kitchen_sink());
    path::set(&mut spec, "duration", 0.25).unwrap();
    assert_eq!(render(&spec).len(), 12000);
}

#[test]
fn toggling_an_effect_changes_output() {
    let mut spec = load(&kitchen_sink());
    let before = render_wav(&spec).pcm_hash;

    path::set(&mut spec, "fx_by_type.softclip.enabled", false).unwrap();
    let dry = render_wav(&spec).pcm_hash;
    assert_ne!(dry, before);

    path::set(&mut spec, "fx_chain[0].enabled", true).unwrap();
    assert_eq!(render_wav(&spec).pcm_hash, before);
}

#[test]
fn param_binding_clamps_to_its_own_range() {
    let mut spec = load(&kitchen_sink());
    let outcome = path::set_param(&mut spec, "osc_freq", 5000.0).unwrap();
    assert!(outcome.clamped);
    assert_eq!(
        path::get(&spec, "layers[0].osc.freq").unwrap(),
        Some(ParamValue::Number(800.0))
    );

    path::set_param(&mut spec, "normalize", false).unwrap();
    assert!(!spec.global.normalize);
}

#[test]
fn choice_update_changes_waveform() {
    let mut spec = load(&kitchen_sink());
    let before = render_wav(&spec).pcm_hash;
    path::set(&mut spec, "layers_by_id.chirp.chirp.waveform", "saw").unwrap();
    assert_ne!(render_wav(&spec).pcm_hash, before);
    assert_eq!(
        path::get(&spec, "layers[1].chirp.waveform").unwrap(),
        Some(ParamValue::Text("saw".to_string()))
    );
}
