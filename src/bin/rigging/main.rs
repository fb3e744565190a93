//! Rigging CLI - build configuration for native C/C++ projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rigging::core::errors::{ConfigurationFault, ConfigureError};
use rigging::util::diagnostic::emit;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        if let Some(fault) = e.downcast_ref::<ConfigurationFault>() {
            emit(&fault.to_diagnostic(), color);
        } else if let Some(err) = e.downcast_ref::<ConfigureError>() {
            emit(&err.to_diagnostic(), color);
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("rigging=debug")
    } else {
        EnvFilter::new("rigging=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match cli.command {
        Commands::Init(args) => commands::init::execute(args, !cli.no_color),
        Commands::Requirements(args) => commands::requirements::execute(args),
        Commands::Layout(args) => commands::layout::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Generate(args) => commands::generate::execute(args),
        Commands::Settings(args) => commands::settings::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
