//! SoundForge CLI - Command-line interface for SoundSpec sound effects
//!
//! This binary provides commands for validating, editing, rendering, and
//! generating SoundSpecs.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Use modules from the library crate
use soundforge_cli::commands;
use soundforge_cli::generator::{self, DEFAULT_GENERATOR, GENERATOR_ENV};

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "SOUNDFORGE_LOG";

/// SoundForge - Declarative Sound Effect Synthesis
#[derive(Parser)]
#[command(name = "soundforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a spec file and report every field error
    Validate {
        /// Path to the spec file
        spec: String,

        /// Output a machine-readable JSON report (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a spec file to a 16-bit mono WAV
    Render {
        /// Path to the spec file
        spec: String,

        /// Output WAV path (default: spec path with .wav extension)
        #[arg(short, long)]
        output: Option<String>,

        /// Edit a leaf before rendering (repeatable)
        #[arg(long = "set", value_name = "PATH=VALUE")]
        sets: Vec<String>,

        /// Output a machine-readable JSON summary
        #[arg(long)]
        json: bool,
    },

    /// Print the value at a parameter path
    Get {
        /// Path to the spec file
        spec: String,

        /// Parameter path, e.g. `layers_by_id.main.osc.freq`
        path: String,
    },

    /// Write a value at a parameter path, clamping to its range
    Set {
        /// Path to the spec file
        spec: String,

        /// Parameter path (or param id with --param)
        path: String,

        /// New value: true/false, a number, or text
        value: String,

        /// Output path (default: overwrite the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Treat PATH as the id of one of the spec's params
        #[arg(long)]
        param: bool,
    },

    /// Print the schema description as JSON
    Schema {
        /// Pretty-print the output JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// List built-in presets, or print one
    Presets {
        /// Preset name
        name: Option<String>,

        /// Write the preset to this path instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate a spec from a text prompt
    Generate {
        /// Description of the sound
        prompt: String,

        /// Write the spec to this path instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Generator strategy
        #[arg(long, env = GENERATOR_ENV, default_value = DEFAULT_GENERATOR)]
        generator: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Validate { spec, json } => commands::validate::run(&spec, json),
        Commands::Render {
            spec,
            output,
            sets,
            json,
        } => commands::render::run(&spec, output.as_deref(), &sets, json),
        Commands::Get { spec, path } => commands::get::run(&spec, &path),
        Commands::Set {
            spec,
            path,
            value,
            output,
            param,
        } => commands::set::run(&spec, &path, &value, output.as_deref(), param),
        Commands::Schema { pretty } => commands::schema::run(pretty),
        Commands::Presets { name, output } => {
            commands::presets::run(name.as_deref(), output.as_deref())
        }
        Commands::Generate {
            prompt,
            output,
            generator: name,
        } => generator::by_name(&name)
            .map_err(anyhow::Error::from)
            .and_then(|strategy| {
                commands::generate::run(&prompt, output.as_deref(), strategy.as_ref())
            }),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
