//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod color;
mod render;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{load_config, ConfigError};
use crate::renderer::Renderer;

use render::OutputFormat;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// qstr - Render Quake-style color-coded strings
#[derive(Parser)]
#[command(name = "qstr")]
#[command(about = "qstr - Render Quake-style color-coded strings (^1red ^x4afblue) as text, HTML, or JSON")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the discovered qstr.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip the decode table from the config
    #[arg(long, global = true)]
    pub no_decode: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read strings from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Strings to render. If omitted, lines are read from --file or stdin
    pub texts: Vec<String>,

    /// Read one string per line from this file
    #[arg(short, long, conflicts_with = "texts")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove all color codes
    Strip {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Render as HTML with nested color spans
    Html {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print colored segments as a JSON array per line
    Parts {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show a 3-digit hex color (e.g. 4a8, ^x4a8, #4a8) as RGB, HSL and span
    Color {
        /// Hex code to inspect
        hex: String,

        /// Minimum lightness (0.0-1.0), requires --ceiling
        #[arg(long, requires = "ceiling", allow_negative_numbers = true)]
        floor: Option<f64>,

        /// Maximum lightness (0.0-1.0), requires --floor
        #[arg(long, requires = "floor", allow_negative_numbers = true)]
        ceiling: Option<f64>,
    },

    /// List the basic ^0-^9 palette
    Palette,
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default level.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qstr=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Build a renderer from the config file (explicit or discovered).
fn load_renderer(config: Option<&Path>, no_decode: bool) -> Result<Renderer, ConfigError> {
    let config = load_config(config)?;
    let mut options = config.render_options();
    if no_decode {
        options.decoder = None;
    }
    Ok(Renderer::new(options))
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let Cli {
        config,
        no_decode,
        command,
    } = Cli::parse();

    init_logging();

    let (input, format) = match command {
        Commands::Color {
            hex,
            floor,
            ceiling,
        } => return color::run_color(&hex, floor, ceiling),
        Commands::Palette => return color::run_palette(),
        Commands::Strip { input } => (input, OutputFormat::Stripped),
        Commands::Html { input } => (input, OutputFormat::Html),
        Commands::Parts { input, pretty } => (input, OutputFormat::Parts { pretty }),
    };

    let renderer = match load_renderer(config.as_deref(), no_decode) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    render::run_render(&renderer, &input, format)
}
