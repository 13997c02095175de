//! stencil CLI - scaffold and rename boilerplate-derived projects
//!
//! This is the main entry point for the stencil command-line interface.

mod cli;
mod commands;
mod output;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use stencil_core::{ConfigLoader, StencilConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use camino::Utf8Path;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Create(args) => commands::create::run(args, &config).await,
        Commands::Rename(args) => commands::rename::run(args, &config).await,
        Commands::Install(args) => commands::install::run(args, &config),
    }
}

fn load_config(path: Option<&Utf8Path>) -> Result<StencilConfig> {
    let loader = ConfigLoader::new().context("Failed to locate the stencil config directory")?;
    loader.load(path).context("Failed to load configuration")
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
