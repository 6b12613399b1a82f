use serde::Deserialize;
use serde_json::Value;

/// Process request body
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub operation: String,
    pub geojson: Value,
    #[serde(default)]
    pub params: Option<Value>,
}
