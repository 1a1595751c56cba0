//! Overlay CLI
//!
//! Loads a bundle manifest and a generated manifest from disk, runs the
//! overlay pipeline and prints the result.

mod cli;
mod error;
mod render;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use colored::Colorize;
use overlay_core::{Outcome, Pipeline};
use overlay_manifest::Manifest;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands, InputArgs, OutputFormat};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Build { input, output } => cmd_build(&input, output),
        Commands::Files { input, contents } => cmd_files(&input, contents),
    }
}

/// Log to stderr: DEBUG with `--verbose`, otherwise whatever `RUST_LOG`
/// asks for (default `warn`).
fn init_logging(verbose: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(true);
    let result = if verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())
    };
    result.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}

/// Load the manifest and generated content named by `input`.
fn load_input(input: &InputArgs) -> Result<(Manifest, Vec<u8>)> {
    let manifest = Manifest::load(&input.manifest)?;
    let generated = match &input.generated {
        Some(path) => read_file(path)?,
        None => Vec::new(),
    };
    Ok((manifest, generated))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn not_applicable(input: &InputArgs) {
    let dir = if input.dir.is_empty() { "." } else { &input.dir };
    eprintln!(
        "{}: no kustomization.yaml in {}; bundle does not use an overlay",
        "note".yellow().bold(),
        dir.cyan()
    );
}

fn cmd_build(input: &InputArgs, output: OutputFormat) -> Result<()> {
    let (manifest, generated) = load_input(input)?;

    match Pipeline::new().process(&manifest, &generated, &input.dir)? {
        Outcome::NotApplicable => not_applicable(input),
        Outcome::Resolved(objects) => {
            let rendered = match output {
                OutputFormat::Yaml => render::yaml_stream(&objects)?,
                OutputFormat::Json => render::json_array(&objects)?,
            };
            write_stdout(&rendered)?;
        }
    }
    Ok(())
}

fn cmd_files(input: &InputArgs, contents: bool) -> Result<()> {
    let (manifest, generated) = load_input(input)?;

    match Pipeline::new().prepare(&manifest, &generated, &input.dir)? {
        None => not_applicable(input),
        Some(prepared) => write_stdout(&render::file_listing(&prepared.fs, contents))?,
    }
    Ok(())
}

fn write_stdout(text: &str) -> Result<()> {
    std::io::stdout().write_all(text.as_bytes())?;
    Ok(())
}
