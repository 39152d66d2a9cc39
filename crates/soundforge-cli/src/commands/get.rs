//! Get command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use soundforge_spec::path;
use std::path::Path;
use std::process::ExitCode;

use crate::input::load_valid_spec;

/// Prints the leaf at `leaf_path`; unset optional leaves print `null`.
pub fn run(spec_path: &str, leaf_path: &str) -> Result<ExitCode> {
    let spec = load_valid_spec(Path::new(spec_path))?;
    let value = path::get(&spec, leaf_path).with_context(|| format!("Failed to read {}", leaf_path))?;

    match value {
        Some(value) => println!("{}", value),
        None => println!("{}", "null".dimmed()),
    }
    Ok(ExitCode::SUCCESS)
}
