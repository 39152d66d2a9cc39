//! SoundForge SoundSpec Library
//!
//! This crate provides the types, validation, and parameter paths for
//! SoundSpecs: declarative JSON descriptions of short synthesized sounds.
//!
//! # Overview
//!
//! A SoundSpec is validated once into a typed tree, optionally edited in place
//! through string paths, and rendered by `soundforge-render` any number of times.
//!
//! # Example
//!
//! ```
//! use soundforge_spec::{path, presets, ParamValue, SoundSpec};
//!
//! // Load and validate a spec
//! let json = presets::preset_json("laser_blast").unwrap().to_string();
//! let mut spec = SoundSpec::from_json(&json).unwrap();
//!
//! // Edit one field through its path
//! path::set(&mut spec, "layers_by_id.main.chirp.f_end", 150.0).unwrap();
//! assert_eq!(
//!     path::get(&spec, "layers[0].chirp.f_end").unwrap(),
//!     Some(ParamValue::Number(150.0))
//! );
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`spec`]: The SoundSpec root type and format constants
//! - [`layer`] / [`fx`] / [`param`]: Typed layers, effects, and UI bindings
//! - [`validation`]: JSON to typed SoundSpec, collecting every field error
//! - [`path`]: Get/set individual leaves by path with clamping
//! - [`ranges`] / [`schema`]: The range table and its JSON description
//! - [`presets`]: Built-in example sounds

pub mod choice;
pub mod error;
pub mod fx;
pub mod layer;
pub mod param;
pub mod path;
pub mod presets;
pub mod ranges;
pub mod schema;
pub mod spec;
pub mod validation;
pub mod wire;

// Re-export commonly used types at the crate root
pub use choice::{
    Choice, Curve, EnvelopeShape, FilterType, FmWaveform, FxType, ImpulseKind, LayerType,
    NoiseColor, ParamKind, Waveform,
};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use fx::{Fx, FxKind};
pub use layer::{
    ChirpParams, Envelope, Filter, FmParams, Harmonic, ImpulseParams, Layer, LayerKind, Modulation,
    NoiseParams, OscParams,
};
pub use param::{Param, ParamDefault};
pub use path::{ParamValue, PathError, SetOutcome};
pub use spec::{
    sample_count, GlobalSettings, SoundSpec, ALLOWED_SAMPLE_RATES, MAX_SAMPLES, MAX_SEED,
    NORMALIZE_CEILING, SPEC_VERSION,
};
pub use validation::{inspect_value, validate_json, validate_spec, validate_value};
