//! Prompt-to-spec generator strategies.
//!
//! A generator turns a free-text prompt into SoundSpec JSON. Its output is
//! untrusted and always goes through the validator before use.

use serde_json::Value;
use soundforge_spec::presets;
use thiserror::Error;

/// Environment variable naming the generator strategy.
pub const GENERATOR_ENV: &str = "SOUNDFORGE_GENERATOR";

/// Strategy used when nothing else is configured.
pub const DEFAULT_GENERATOR: &str = "mock";

/// Errors a generator can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("unknown generator `{0}` (available: mock)")]
    UnknownGenerator(String),

    #[error("generator produced no spec: {0}")]
    NoOutput(String),
}

/// Produces SoundSpec JSON from a prompt.
pub trait SpecGenerator {
    /// Short name used in logs and `--generator`.
    fn name(&self) -> &str;

    /// Generates a candidate spec document.
    fn generate(&self, prompt: &str) -> Result<Value, GeneratorError>;
}

/// Offline generator that maps prompt keywords onto built-in presets.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordGenerator;

impl KeywordGenerator {
    /// Preset chosen for `prompt`. First matching rule wins.
    pub fn preset_for(prompt: &str) -> &'static str {
        let prompt = prompt.to_lowercase();
        let has = |word: &str| prompt.contains(word);

        if has("laser") {
            "laser_blast"
        } else if has("explosion") || has("boom") {
            "explosion"
        } else if has("shield") || has("deflect") {
            "shield_deflect"
        } else if has("click") {
            "ui_click"
        } else {
            "gentle_pickup"
        }
    }
}

impl SpecGenerator for KeywordGenerator {
    fn name(&self) -> &str {
        DEFAULT_GENERATOR
    }

    fn generate(&self, prompt: &str) -> Result<Value, GeneratorError> {
        if prompt.trim().is_empty() {
            return Err(GeneratorError::EmptyPrompt);
        }
        let preset = Self::preset_for(prompt);
        presets::preset_json(preset).ok_or_else(|| GeneratorError::NoOutput(preset.to_string()))
    }
}

/// Resolves a strategy by name.
pub fn by_name(name: &str) -> Result<Box<dyn SpecGenerator>, GeneratorError> {
    match name {
        "mock" | "keyword" => Ok(Box::new(KeywordGenerator)),
        other => Err(GeneratorError::UnknownGenerator(other.to_string())),
    }
}
