use geoproc_core::{Operation, ProcessingDefaults};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
}

impl HealthResponse {
    pub fn new(engine: Option<&str>) -> Self {
        Self {
            status: if engine.is_some() { "ok" } else { "degraded" },
            service: "geoproc-api",
            engine: engine.map(str::to_string),
        }
    }
}

/// One registry entry
#[derive(Debug, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct OperationsResponse {
    pub available: bool,
    pub operations: Vec<OperationInfo>,
}

impl OperationsResponse {
    pub fn new(available: bool, defaults: &ProcessingDefaults) -> Self {
        let operations = Operation::ALL
            .iter()
            .map(|operation| OperationInfo {
                name: operation.as_str(),
                description: operation.description(),
                parameter: operation.parameter(),
                default: match operation {
                    Operation::OffsetPolygon => Some(defaults.offset_distance),
                    Operation::Extrude => Some(defaults.extrude_height),
                    _ => None,
                },
            })
            .collect();

        Self { available, operations }
    }
}
