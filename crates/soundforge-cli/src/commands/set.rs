//! Set command implementation
//!
//! Writes one leaf (or param binding) and saves the updated spec.

use anyhow::{Context, Result};
use colored::Colorize;
use soundforge_spec::{path, ParamValue};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::reporting::print_set_outcome;
use crate::input::{load_valid_spec, write_spec};

/// Run the set command
///
/// # Arguments
/// * `spec_path` - Path to the spec file
/// * `target` - Leaf path, or a param id when `by_param` is set
/// * `value` - Literal: `true`/`false`, a number, or text
/// * `output` - Output path (default: overwrite the input)
/// * `by_param` - Resolve `target` through the spec's param bindings
pub fn run(
    spec_path: &str,
    target: &str,
    value: &str,
    output: Option<&str>,
    by_param: bool,
) -> Result<ExitCode> {
    let mut spec = load_valid_spec(Path::new(spec_path))?;
    let value = ParamValue::parse_literal(value);

    let outcome = if by_param {
        path::set_param(&mut spec, target, value)
    } else {
        path::set(&mut spec, target, value)
    }
    .with_context(|| format!("Failed to set {}", target))?;

    let out_path = output.map(PathBuf::from).unwrap_or_else(|| PathBuf::from(spec_path));
    write_spec(&spec, &out_path)?;

    print_set_outcome(target, &outcome);
    println!("{} {}", "Wrote:".dimmed(), out_path.display());
    Ok(ExitCode::SUCCESS)
}
