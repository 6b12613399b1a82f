//! geoproc CLI - Command-line interface
//!
//! Runs geometry operations on GeoJSON files or stdin.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;

use clap::Parser;
use cli::Cli;
use output::OutputWriter;

fn main() {
    // Logs go to stderr; stdout carries the GeoJSON result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(error) = commands::execute(cli) {
        let error = errors::from_anyhow(error);
        if json {
            OutputWriter::new(true).error(&error);
        } else {
            error.display();
        }
        std::process::exit(1);
    }
}
