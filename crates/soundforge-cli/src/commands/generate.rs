//! Generate command implementation
//!
//! Runs a generator strategy on a prompt and validates what it returns.

use anyhow::{Context, Result};
use colored::Colorize;
use soundforge_spec::validation;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use super::reporting::{print_json, print_validation_messages};
use crate::generator::SpecGenerator;
use crate::input::write_spec;

/// Run the generate command
///
/// # Arguments
/// * `prompt` - Free-text description of the sound
/// * `output` - Where to write the spec (default: stdout)
/// * `generator` - Strategy chosen at startup
///
/// # Returns
/// Exit code: 0 if the generated spec validated, 1 otherwise
pub fn run(prompt: &str, output: Option<&str>, generator: &dyn SpecGenerator) -> Result<ExitCode> {
    debug!(generator = generator.name(), prompt, "generating spec");
    let value = generator
        .generate(prompt)
        .with_context(|| format!("Generator `{}` failed", generator.name()))?;

    let (spec, result) = validation::inspect_value(&value);
    let Some(spec) = spec else {
        eprintln!(
            "{} generator `{}` produced an invalid spec:",
            "error".red(),
            generator.name()
        );
        print_validation_messages(&result);
        return Ok(ExitCode::from(1));
    };

    match output {
        Some(out) => {
            write_spec(&spec, Path::new(out))?;
            println!(
                "{} {} -> {}",
                "Generated:".cyan().bold(),
                spec.name,
                out
            );
        }
        None => print_json(&spec, true)?,
    }
    Ok(ExitCode::SUCCESS)
}
