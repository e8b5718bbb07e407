//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stache")]
#[command(version, about = "Compile and render mustache templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: ./stache.toml if present)
    #[arg(long, global = true, env = "STACHE_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template to stdout
    Render(RenderArgs),

    /// Parse templates without rendering them
    Check(CheckArgs),
}

#[derive(Args)]
pub struct RenderArgs {
    /// Template file
    pub template: PathBuf,

    /// Data file (.json, otherwise TOML)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    #[command(flatten)]
    pub lookup: PartialArgs,

    /// Write output incrementally through the streaming renderer
    #[arg(long)]
    pub stream: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Template files
    #[arg(required = true)]
    pub templates: Vec<PathBuf>,

    #[command(flatten)]
    pub lookup: PartialArgs,
}

/// Where `{{>name}}` references are looked up
#[derive(Args)]
pub struct PartialArgs {
    /// Partials directory (default: the template's directory)
    #[arg(short, long)]
    pub partials: Option<PathBuf>,

    /// Partial file extension (default: mustache)
    #[arg(short, long)]
    pub extension: Option<String>,
}
