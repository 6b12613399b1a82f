//! Command implementations

mod doctor;
mod operations;
mod process;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Process(args) => process::execute(args, config, &output),
        Commands::Operations => operations::execute(config, &output),
        Commands::Doctor(args) => doctor::execute(args, config, &output),
    }
}
