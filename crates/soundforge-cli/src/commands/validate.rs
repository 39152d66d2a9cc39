//! Validate command implementation
//!
//! Checks a spec file and reports every field error.

use anyhow::Result;
use colored::Colorize;
use soundforge_spec::{validation, SoundSpec, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::reporting::{print_json, print_validation_messages, validation_to_json};
use crate::input::read_json;

/// Run the validate command
///
/// # Arguments
/// * `spec_path` - Path to the spec file
/// * `json_output` - Whether to output a machine-readable JSON report
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(spec_path: &str, json_output: bool) -> Result<ExitCode> {
    let (spec, result) = check(Path::new(spec_path))?;

    if json_output {
        print_json(&validation_to_json(&result), true)?;
    } else {
        println!("{} {}", "Validating:".cyan().bold(), spec_path);
        print_validation_messages(&result);

        match &spec {
            Some(spec) => println!(
                "\n{} {} ({} layer(s), {} samples)",
                "SUCCESS".green().bold(),
                spec.name,
                spec.layers.len(),
                spec.num_samples()
            ),
            None => println!(
                "\n{} Spec has {} error(s)",
                "FAILED".red().bold(),
                result.errors.len()
            ),
        }
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Reads and validates a spec file. The spec is `Some` exactly when the
/// result holds no errors.
pub fn check(spec_path: &Path) -> Result<(Option<SoundSpec>, ValidationResult)> {
    let value = read_json(spec_path)?;
    Ok(validation::inspect_value(&value))
}
