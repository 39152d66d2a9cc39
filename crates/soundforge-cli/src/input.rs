//! Loading and saving SoundSpec files.

use anyhow::{Context, Result};
use serde_json::Value;
use soundforge_spec::{validation, SoundSpec, ValidationResult};
use std::path::Path;
use tracing::debug;

/// Outcome of reading a spec file.
#[derive(Debug)]
pub enum LoadResult {
    /// The document validated.
    Valid(SoundSpec),
    /// The document parsed as JSON but failed validation.
    Invalid(ValidationResult),
}

/// Reads a file and parses it as JSON.
pub fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Reads and validates a spec file.
///
/// Unreadable files and malformed JSON are errors; a document that parses but
/// fails validation is returned as [`LoadResult::Invalid`].
pub fn load_spec(path: &Path) -> Result<LoadResult> {
    let value = read_json(path)?;
    let (spec, result) = validation::inspect_value(&value);
    debug!(
        path = %path.display(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "loaded spec"
    );
    Ok(match spec {
        Some(spec) => LoadResult::Valid(spec),
        None => LoadResult::Invalid(result),
    })
}

/// Reads a spec file that must be valid.
pub fn load_valid_spec(path: &Path) -> Result<SoundSpec> {
    match load_spec(path)? {
        LoadResult::Valid(spec) => Ok(spec),
        LoadResult::Invalid(result) => Err(anyhow::anyhow!(
            "{} is not a valid SoundSpec:\n{}",
            path.display(),
            result
        )),
    }
}

/// Writes a spec as pretty-printed JSON with a trailing newline.
pub fn write_spec(spec: &SoundSpec, path: &Path) -> Result<()> {
    let mut json = spec
        .to_json_pretty()
        .context("Failed to serialize spec")?;
    json.push('\n');
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write spec file: {}", path.display()))
}
