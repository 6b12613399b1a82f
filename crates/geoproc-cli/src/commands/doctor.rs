use crate::cli::DoctorArgs;
use crate::config_loader::{config_path, load_config};
use crate::output::OutputWriter;
use anyhow::Result;
use console::style;
use geoproc_core::config::ConfigSource;
use geoproc_core::{GeometryEngine, Operation, Processor};
use geoproc_geo::GeoEngine;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;

pub fn execute(args: DoctorArgs, config: Option<&Path>, output: &OutputWriter) -> Result<()> {
    output.section("geoproc Health Check");

    let mut checks_passed = 0;
    let mut total_checks = 0;

    // Engine
    total_checks += 1;
    let engine = GeoEngine::new();
    let processor = Processor::new(engine);
    if processor.is_engine_available() {
        output.check(true, "Engine", format!("{} is available", engine.name()));
        checks_passed += 1;
    } else {
        output.check(false, "Engine", "no geometry engine is configured");
    }

    // Smoke test every operation on a unit square
    let square = json!({
        "type": "Polygon",
        "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
    });
    let mut operations = BTreeMap::new();
    for operation in Operation::ALL {
        total_checks += 1;
        match processor.process(operation.as_str(), &square, None) {
            Ok(_) => {
                output.check(true, operation, "ok");
                checks_passed += 1;
                operations.insert(operation.as_str(), "ok".to_string());
            }
            Err(e) => {
                output.check(false, operation, &e);
                operations.insert(operation.as_str(), e.to_string());
            }
        }
    }

    // Configuration
    total_checks += 1;
    let path = config_path(config);
    let mut settings = BTreeMap::new();
    match load_config(config) {
        Ok(layered) => {
            let origin = if path.is_file() {
                path.display().to_string()
            } else {
                "defaults (no config file)".to_string()
            };
            output.check(true, "Config", origin);
            checks_passed += 1;

            let mut entries: Vec<_> = layered.to_inspection_map().into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, (value, source)) in entries {
                if args.verbose {
                    output.kv(&key, format!("{} {}", value, style(source_label(source)).dim()));
                }
                settings.insert(key, json!({"value": value, "source": source_label(source)}));
            }
        }
        Err(e) => {
            output.check(false, "Config", format!("{:#}", e));
        }
    }

    if output.is_json() {
        return output.result(json!({
            "engine": engine.name(),
            "operations": operations,
            "config": settings,
            "checks_passed": checks_passed,
            "total_checks": total_checks,
        }));
    }

    println!();
    let summary = format!("{}/{} checks passed", checks_passed, total_checks);
    if checks_passed == total_checks {
        println!("{} {}", style("✓").green().bold(), summary);
    } else {
        println!("{} {}", style("⚠").yellow().bold(), summary);
        output.warning("Some checks failed. Run with RUST_LOG=debug for details.");
    }

    Ok(())
}

fn source_label(source: ConfigSource) -> &'static str {
    match source {
        ConfigSource::Default => "default",
        ConfigSource::File => "file",
        ConfigSource::Environment => "env",
        ConfigSource::Cli => "cli",
    }
}
