mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args, cli.config.as_deref(), cli.verbose),
        Commands::Check(args) => commands::check::run(args, cli.config.as_deref(), cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
