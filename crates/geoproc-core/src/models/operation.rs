//! Operation registry types and per-operation parameters.

use crate::error::{GeoprocError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Offset distance used when the caller does not provide `offsetDistance`
pub const DEFAULT_OFFSET_DISTANCE: f64 = 1.0;

/// Extrusion height used when the caller does not provide `extrudeHeight`
pub const DEFAULT_EXTRUDE_HEIGHT: f64 = 10.0;

/// The fixed set of engine operations exposed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "triangulate_2dz")]
    Triangulate2dz,
    #[serde(rename = "straight_skeleton")]
    StraightSkeleton,
    #[serde(rename = "offset_polygon")]
    OffsetPolygon,
    #[serde(rename = "extrude")]
    Extrude,
}

impl Operation {
    /// Every registered operation, in registry order
    pub const ALL: [Operation; 4] = [
        Operation::Triangulate2dz,
        Operation::StraightSkeleton,
        Operation::OffsetPolygon,
        Operation::Extrude,
    ];

    /// Wire name used by callers
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Triangulate2dz => "triangulate_2dz",
            Operation::StraightSkeleton => "straight_skeleton",
            Operation::OffsetPolygon => "offset_polygon",
            Operation::Extrude => "extrude",
        }
    }

    /// Prefix of the error message reported when the engine yields no result
    pub fn failure_label(&self) -> &'static str {
        match self {
            Operation::Triangulate2dz => "Triangulation",
            Operation::StraightSkeleton => "Straight skeleton computation",
            Operation::OffsetPolygon => "Offset polygon computation",
            Operation::Extrude => "Extrusion",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::Triangulate2dz => "Constrained Delaunay triangulation keeping vertex Z",
            Operation::StraightSkeleton => "Straight skeleton of polygonal input",
            Operation::OffsetPolygon => "Grow (positive) or shrink (negative) by a distance",
            Operation::Extrude => "Extrude along Z into a 3D surface",
        }
    }

    /// Name of the parameter this operation reads from the params object, if any
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Operation::OffsetPolygon => Some("offsetDistance"),
            Operation::Extrude => Some("extrudeHeight"),
            _ => None,
        }
    }

    /// Names of all registered operations
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|op| op.as_str().to_string()).collect()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = GeoprocError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| GeoprocError::UnknownOperation {
                name: s.to_string(),
                available: Self::names(),
            })
    }
}

/// Parameters a caller may attach to a processing request.
///
/// Keys follow the map client's camelCase naming. Only the key an
/// operation reads is ever inspected; every other key is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperationParams<'a> {
    raw: Option<&'a Value>,
}

impl<'a> OperationParams<'a> {
    /// Wrap an optional JSON params object; `null` counts as absent
    pub fn from_json(params: Option<&'a Value>) -> Self {
        Self { raw: params.filter(|value| !value.is_null()) }
    }

    /// Numeric value stored under `key`, if present
    pub fn number(&self, key: &str) -> Result<Option<f64>> {
        match self.raw {
            None => Ok(None),
            Some(Value::Object(object)) => number_param(object, key),
            Some(other) => Err(GeoprocError::InvalidParameter {
                key: "params".to_string(),
                reason: format!("expected a JSON object, got {}", json_type_name(other)),
            }),
        }
    }

    /// Value of the parameter `operation` reads, if it reads one and it is present
    pub fn for_operation(&self, operation: Operation) -> Result<Option<f64>> {
        match operation.parameter() {
            Some(key) => self.number(key),
            None => Ok(None),
        }
    }
}

fn number_param(object: &serde_json::Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
            GeoprocError::InvalidParameter {
                key: key.to_string(),
                reason: format!("{} is not representable as a float", n),
            }
        }),
        Some(other) => Err(GeoprocError::InvalidParameter {
            key: key.to_string(),
            reason: format!("expected a number, got {}", json_type_name(other)),
        }),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fallback values applied when a request omits optional settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessingDefaults {
    pub offset_distance: f64,
    pub extrude_height: f64,
    pub preserve_properties: bool,
}

impl Default for ProcessingDefaults {
    fn default() -> Self {
        Self {
            offset_distance: DEFAULT_OFFSET_DISTANCE,
            extrude_height: DEFAULT_EXTRUDE_HEIGHT,
            preserve_properties: true,
        }
    }
}
