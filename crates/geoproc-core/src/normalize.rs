//! Conversion between GeoJSON envelopes and engine geometries.
//!
//! Input payloads come in three shapes: a bare geometry, a single Feature or
//! a FeatureCollection. The input side unwraps them into one engine geometry
//! and remembers the shape; the output side wraps the engine result back into
//! that same shape.

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use serde_json::Value;

use crate::error::{GeoprocError, Result};
use crate::models::operation::json_type_name;
use crate::models::{EnvelopeKind, InputEnvelope};
use crate::ports::GeometryEngine;

/// Property set on every Feature produced by the processor
pub const PROCESSED_KEY: &str = "processed";

/// Unwrap a GeoJSON payload into a single engine geometry.
pub fn normalize_input<E: GeometryEngine>(
    engine: &E,
    input: &Value,
) -> Result<(E::Geometry, InputEnvelope)> {
    let object = input.as_object().ok_or_else(|| GeoprocError::InvalidGeoJson {
        reason: format!("expected a JSON object, got {}", json_type_name(input)),
    })?;

    match object.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {
            let features = match object.get("features") {
                None | Some(Value::Null) => &[][..],
                Some(Value::Array(features)) => features.as_slice(),
                Some(other) => {
                    return Err(GeoprocError::InvalidGeoJson {
                        reason: format!(
                            "FeatureCollection features must be an array, got {}",
                            json_type_name(other)
                        ),
                    })
                }
            };

            if features.is_empty() {
                return Err(GeoprocError::EmptyFeatureCollection);
            }

            let mut geometries = Vec::with_capacity(features.len());
            for (idx, feature) in features.iter().enumerate() {
                match feature_geometry(feature) {
                    Some(geometry) => geometries.push(read_geometry(engine, geometry)?),
                    None => tracing::debug!(feature = idx, "Skipping feature without geometry"),
                }
            }

            let count = geometries.len();
            let geometry = match count {
                0 => return Err(GeoprocError::NoGeometry),
                1 => geometries.remove(0),
                _ => engine.collect(geometries),
            };

            Ok((geometry, InputEnvelope::feature_collection(count)))
        }
        Some("Feature") => {
            let geometry = feature_geometry(input).ok_or(GeoprocError::FeatureWithoutGeometry)?;
            let geometry = read_geometry(engine, geometry)?;

            let properties = object.get("properties").and_then(Value::as_object).cloned();
            let id = object.get("id").and_then(feature_id);

            Ok((geometry, InputEnvelope::feature(properties, id)))
        }
        _ => Ok((read_geometry(engine, input)?, InputEnvelope::geometry())),
    }
}

/// Wrap an engine result so it mirrors the caller's input envelope.
///
/// Without an envelope the bare geometry is returned.
pub fn normalize_output(
    geometry: geojson::Geometry,
    original: Option<&InputEnvelope>,
    preserve_properties: bool,
) -> GeoJson {
    let Some(original) = original else {
        return GeoJson::Geometry(geometry);
    };

    match original.kind {
        EnvelopeKind::FeatureCollection => GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: Some(processed_properties(JsonObject::new())),
                foreign_members: None,
            }],
            foreign_members: None,
        }),
        EnvelopeKind::Feature => {
            let (properties, id) = if preserve_properties {
                (original.properties.clone().unwrap_or_default(), original.id.clone())
            } else {
                (JsonObject::new(), None)
            };

            GeoJson::Feature(Feature {
                bbox: None,
                geometry: Some(geometry),
                id,
                properties: Some(processed_properties(properties)),
                foreign_members: None,
            })
        }
        EnvelopeKind::Geometry => GeoJson::Geometry(geometry),
    }
}

fn processed_properties(mut properties: JsonObject) -> JsonObject {
    properties.insert(PROCESSED_KEY.to_string(), Value::Bool(true));
    properties
}

/// A feature's geometry; `null` and `{}` both mean the feature has none
fn feature_geometry(feature: &Value) -> Option<&Value> {
    feature.get("geometry").filter(|geometry| match geometry {
        Value::Null => false,
        Value::Object(object) => !object.is_empty(),
        _ => true,
    })
}

fn feature_id(id: &Value) -> Option<Id> {
    match id {
        Value::String(s) => Some(Id::String(s.clone())),
        Value::Number(n) => Some(Id::Number(n.clone())),
        _ => None,
    }
}

fn read_geometry<E: GeometryEngine>(engine: &E, value: &Value) -> Result<E::Geometry> {
    let geometry: geojson::Geometry =
        serde_json::from_value(value.clone()).map_err(|e| GeoprocError::InvalidGeoJson {
            reason: format!("not a GeoJSON geometry: {}", e),
        })?;

    engine
        .from_geojson(&geometry)
        .map_err(|e| GeoprocError::Conversion { reason: e.reason })
}
