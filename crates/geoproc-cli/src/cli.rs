use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// geoproc - GeoJSON geometry processing
#[derive(Parser, Debug)]
#[command(name = "geoproc")]
#[command(about = "Triangulate, skeletonize, offset and extrude GeoJSON geometry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./geoproc.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an operation on a GeoJSON document
    Process(ProcessArgs),

    /// List the registered operations
    Operations,

    /// Check the geometry engine and the effective configuration
    Doctor(DoctorArgs),
}

#[derive(Parser, Debug)]
pub struct ProcessArgs {
    /// Operation name (triangulate_2dz, straight_skeleton, offset_polygon, extrude)
    pub operation: String,

    /// GeoJSON file to read; stdin when absent or "-"
    pub input: Option<PathBuf>,

    /// Operation parameters as a JSON object, e.g. '{"offsetDistance": 2.0}'
    #[arg(long, value_name = "JSON")]
    pub params: Option<String>,

    /// Default offset distance when params do not name one
    #[arg(long, allow_negative_numbers = true)]
    pub offset_distance: Option<f64>,

    /// Default extrusion height when params do not name one
    #[arg(long, allow_negative_numbers = true)]
    pub extrude_height: Option<f64>,

    /// Drop the input Feature's properties from the result
    #[arg(long)]
    pub no_preserve_properties: bool,

    /// Write the result to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug)]
pub struct DoctorArgs {
    /// Show where every configuration value comes from
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
