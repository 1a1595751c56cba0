//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Overlay - Resolve a bundle's overlay together with its generated manifest
#[derive(Parser, Debug)]
#[command(name = "overlay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the overlay and print the resulting objects
    ///
    /// Examples:
    ///   overlay build -m bundle.json -g rendered.yaml
    ///   overlay build -m bundle.yaml -d overlays/prod --output json
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        output: OutputFormat,
    },

    /// Print the virtual filesystem handed to the engine, without resolving
    Files {
        #[command(flatten)]
        input: InputArgs,

        /// Print file contents as well as paths
        #[arg(long)]
        contents: bool,
    },
}

/// Where the bundle and generated content come from.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct InputArgs {
    /// Bundle manifest (.json, .yaml or .yml)
    #[arg(short, long, env = "OVERLAY_MANIFEST")]
    pub manifest: PathBuf,

    /// Generated manifest to inject as manifests.yaml
    #[arg(short, long)]
    pub generated: Option<PathBuf>,

    /// Overlay entry directory inside the bundle (defaults to its root)
    #[arg(short, long, default_value = "")]
    pub dir: String,
}

/// Output formats for resolved objects
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Multi-document YAML stream
    Yaml,
    /// JSON array
    Json,
}
