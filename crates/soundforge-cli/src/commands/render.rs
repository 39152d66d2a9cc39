//! Render command implementation
//!
//! Validates a spec, applies `--set` edits, and writes a 16-bit mono WAV.

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use soundforge_render::{mixer::peak, try_render, WavResult};
use soundforge_spec::{path, ParamValue};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use super::reporting::{parse_assignment, print_json, print_set_outcome};
use crate::input::load_valid_spec;

/// Output path used when `-o` is absent: the spec path with a `.wav` extension.
pub fn default_output(spec_path: &Path) -> PathBuf {
    spec_path.with_extension("wav")
}

/// Run the render command
///
/// # Arguments
/// * `spec_path` - Path to the spec file
/// * `output` - WAV output path (default: next to the spec)
/// * `sets` - `path=value` edits applied before rendering
/// * `json_output` - Whether to print a JSON summary
pub fn run(
    spec_path: &str,
    output: Option<&str>,
    sets: &[String],
    json_output: bool,
) -> Result<ExitCode> {
    let spec_file = Path::new(spec_path);
    let mut spec = load_valid_spec(spec_file)?;

    if !json_output {
        println!("{} {}", "Rendering:".cyan().bold(), spec.name);
    }

    for assignment in sets {
        let (leaf, raw) = parse_assignment(assignment)?;
        let outcome = path::set(&mut spec, leaf, ParamValue::parse_literal(raw))
            .with_context(|| format!("Failed to set {}", leaf))?;
        if !json_output {
            print_set_outcome(leaf, &outcome);
        }
    }

    let samples = try_render(&spec).context("Edited spec is not renderable")?;
    let wav = WavResult::from_samples(&samples, spec.sample_rate);

    let out_path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(spec_file));
    wav.save(&out_path)
        .with_context(|| format!("Failed to write WAV file: {}", out_path.display()))?;
    info!(path = %out_path.display(), samples = wav.num_samples, "wrote wav");

    let peak = peak(&samples);
    if json_output {
        print_json(
            &json!({
                "output": out_path.display().to_string(),
                "num_samples": wav.num_samples,
                "sample_rate": wav.sample_rate,
                "peak": peak,
                "pcm_hash": wav.pcm_hash,
            }),
            true,
        )?;
    } else {
        println!("{} {}", "Output:".dimmed(), out_path.display());
        println!(
            "{} {} @ {} Hz ({:.3}s)",
            "Samples:".dimmed(),
            wav.num_samples,
            wav.sample_rate,
            wav.duration_seconds()
        );
        println!("{} {:.4}", "Peak:".dimmed(), peak);
        println!("{} {}", "PCM hash:".dimmed(), wav.pcm_hash);
        println!("\n{} Rendered {}", "SUCCESS".green().bold(), spec.name);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_swaps_extension() {
        assert_eq!(
            default_output(Path::new("sfx/laser.json")),
            PathBuf::from("sfx/laser.wav")
        );
        assert_eq!(default_output(Path::new("laser")), PathBuf::from("laser.wav"));
    }
}
