use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;
use geoproc_core::{Operation, ProcessingDefaults};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
struct OperationRow {
    #[tabled(rename = "Operation")]
    name: &'static str,
    #[tabled(rename = "Parameter")]
    parameter: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Description")]
    description: &'static str,
}

pub fn execute(config: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let defaults = load_config(config)?.processing_defaults();
    output.table(rows(&defaults))
}

fn rows(defaults: &ProcessingDefaults) -> Vec<OperationRow> {
    Operation::ALL
        .iter()
        .map(|operation| {
            let default = match operation {
                Operation::OffsetPolygon => defaults.offset_distance.to_string(),
                Operation::Extrude => defaults.extrude_height.to_string(),
                _ => "-".to_string(),
            };
            OperationRow {
                name: operation.as_str(),
                parameter: operation.parameter().unwrap_or("-").to_string(),
                default,
                description: operation.description(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_show_configured_defaults() {
        let defaults = ProcessingDefaults { extrude_height: 3.5, ..Default::default() };
        let rows = rows(&defaults);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].name, "triangulate_2dz");
        assert_eq!(rows[0].default, "-");

        let extrude = rows.iter().find(|row| row.name == "extrude").unwrap();
        assert_eq!(extrude.parameter, "extrudeHeight");
        assert_eq!(extrude.default, "3.5");
    }
}
