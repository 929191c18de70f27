//! Datalint CLI - data validation and drift detection.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use datalint::{Datalint, DatalintConfig};
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. RUST_LOG wins over the CLI flags.
fn init_logging(verbose: bool, log_level: &str) {
    let level = if verbose { "debug" } else { log_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_datalint(cli: &Cli) -> Result<Datalint, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => DatalintConfig::from_file(path)?,
        None => DatalintConfig::default(),
    };
    Ok(Datalint::with_config(config))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, &cli.log_level);

    let result = build_datalint(&cli).and_then(|datalint| match cli.command {
        Commands::Validate { file, format } => commands::validate::run(&datalint, file, format),

        Commands::Profile {
            file,
            learn,
            output,
            profile,
            format,
        } => match profile {
            Some(profile) if !learn => commands::profile::check(&datalint, file, profile, format),
            _ => commands::profile::learn(&datalint, file, output, format),
        },
    });

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
