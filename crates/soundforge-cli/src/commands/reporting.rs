//! Shared output helpers for commands.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::{json, Value};
use soundforge_spec::{SetOutcome, ValidationResult};

/// Machine-readable form of a validation result.
pub(crate) fn validation_to_json(result: &ValidationResult) -> Value {
    let errors: Vec<Value> = result
        .errors
        .iter()
        .map(|e| json!({"code": e.code.code(), "path": e.path, "message": e.message}))
        .collect();
    let warnings: Vec<Value> = result
        .warnings
        .iter()
        .map(|w| json!({"code": w.code.code(), "path": w.path, "message": w.message}))
        .collect();

    json!({
        "ok": result.is_ok(),
        "errors": errors,
        "warnings": warnings,
    })
}

/// Prints errors as `path: message`, then warnings.
pub(crate) fn print_validation_messages(result: &ValidationResult) {
    for error in &result.errors {
        println!(
            "  {} {}: {} {}",
            "x".red(),
            error.display_path().bold(),
            error.message,
            format!("[{}]", error.code).dimmed()
        );
    }
    for warning in &result.warnings {
        println!(
            "  {} {}: {} {}",
            "!".yellow(),
            warning.path.bold(),
            warning.message,
            format!("[{}]", warning.code).dimmed()
        );
    }
}

/// Prints the value a write stored, noting when it was clamped.
pub(crate) fn print_set_outcome(path: &str, outcome: &SetOutcome) {
    if outcome.clamped {
        println!(
            "  {} {} = {} {}",
            "~".yellow(),
            path,
            outcome.stored,
            "(clamped)".yellow()
        );
    } else {
        println!("  {} {} = {}", "+".green(), path, outcome.stored);
    }
}

/// Prints a JSON value, pretty or compact.
pub(crate) fn print_json(value: &impl serde::Serialize, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

/// Splits a `path=value` assignment.
pub(crate) fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    assignment
        .split_once('=')
        .map(|(path, value)| (path.trim(), value.trim()))
        .filter(|(path, _)| !path.is_empty())
        .ok_or_else(|| anyhow::anyhow!("expected `path=value`, got `{}`", assignment))
}
