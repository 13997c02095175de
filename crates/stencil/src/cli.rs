//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// stencil - scaffold and rename projects from the fullstack boilerplate
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a stencil config.yaml (default: ~/.stencil/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project from the boilerplate
    Create(CreateArgs),

    /// Rename an existing boilerplate-derived project
    Rename(RenameArgs),

    /// Link the stencil binary into a directory on PATH
    Install(InstallArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name (lowercase letters, digits, '-' and '_'); prompted when omitted
    pub name: Option<String>,

    /// Clone from this repository instead of the configured boilerplate
    #[arg(long)]
    pub template: Option<String>,

    /// Branch of the boilerplate to clone
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Commit the renamed project after re-initializing git
    #[arg(long)]
    pub initial_commit: bool,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Project directory to rename
    pub path: Utf8PathBuf,

    /// New project name (lowercase letters, digits, '-' and '_')
    pub new_name: String,

    /// Print the rename report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Directory to link into (default: ~/.local/bin)
    #[arg(short, long)]
    pub dir: Option<Utf8PathBuf>,

    /// Replace an existing file at the link location
    #[arg(short, long)]
    pub force: bool,
}
