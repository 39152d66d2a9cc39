//! Presets command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use soundforge_spec::presets;
use std::path::Path;
use std::process::ExitCode;

use super::reporting::print_json;
use crate::input::write_spec;

/// Lists presets, or prints/writes the one named.
pub fn run(name: Option<&str>, output: Option<&str>) -> Result<ExitCode> {
    let Some(name) = name else {
        for (name, spec) in presets::all() {
            println!("{:<16} {}", name.bold(), spec.description.dimmed());
        }
        return Ok(ExitCode::SUCCESS);
    };

    let spec = presets::get(name).with_context(|| {
        format!(
            "unknown preset `{}` (available: {})",
            name,
            presets::PRESET_NAMES.join(", ")
        )
    })?;

    match output {
        Some(out) => {
            write_spec(&spec, Path::new(out))?;
            println!("{} {}", "Wrote:".dimmed(), out);
        }
        None => print_json(&spec, true)?,
    }
    Ok(ExitCode::SUCCESS)
}
