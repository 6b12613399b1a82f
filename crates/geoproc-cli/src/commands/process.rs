use crate::cli::ProcessArgs;
use crate::config_loader::load_config_with_overrides;
use crate::errors;
use crate::output::{render, OutputWriter};
use anyhow::{Context, Result};
use geoproc_core::config::CliConfigOverrides;
use geoproc_core::Processor;
use geoproc_geo::GeoEngine;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

pub fn execute(args: ProcessArgs, config: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let overrides = CliConfigOverrides {
        offset_distance: args.offset_distance,
        extrude_height: args.extrude_height,
        preserve_properties: args.no_preserve_properties.then_some(false),
    };
    let config = load_config_with_overrides(config, overrides)?;

    let processor = Processor::new(GeoEngine::new()).with_defaults(config.processing_defaults());

    let raw = read_input(args.input.as_deref())?;
    let geojson: Value = serde_json::from_str(&raw).map_err(|e| errors::invalid_json("input", &e))?;
    let params = args
        .params
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .map_err(|e| errors::invalid_json("--params", &e))?;

    let result = processor
        .process(&args.operation, &geojson, params.as_ref())
        .map_err(errors::from_geoproc)?;

    match args.output {
        Some(path) => {
            let mut rendered = render(&result, args.compact)?;
            rendered.push('\n');
            std::fs::write(&path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            if output.is_json() {
                output.result(serde_json::json!({
                    "operation": args.operation,
                    "output": path.display().to_string(),
                }))?;
            } else {
                output.success(format!("Wrote {} result to {}", args.operation, path.display()));
            }
        }
        None => output.document(&result, args.compact)?,
    }

    Ok(())
}

/// Read the input document from a file, or stdin for `None` and `-`
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                return Err(errors::input_not_found(&path.display().to_string()).into());
            }
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read GeoJSON from stdin")?;
            Ok(buffer)
        }
    }
}
