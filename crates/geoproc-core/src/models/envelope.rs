//! The outer shape of a GeoJSON payload, remembered so results can mirror it.

use geojson::feature::Id;
use geojson::JsonObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which GeoJSON wrapper the caller sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeKind {
    FeatureCollection,
    Feature,
    Geometry,
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeKind::FeatureCollection => f.write_str("FeatureCollection"),
            EnvelopeKind::Feature => f.write_str("Feature"),
            EnvelopeKind::Geometry => f.write_str("Geometry"),
        }
    }
}

/// Metadata of the input payload needed to rebuild the output envelope
#[derive(Debug, Clone, PartialEq)]
pub struct InputEnvelope {
    pub kind: EnvelopeKind,
    /// Properties of a single Feature input
    pub properties: Option<JsonObject>,
    /// Identifier of a single Feature input
    pub id: Option<Id>,
    /// Number of geometries handed to the engine
    pub geometry_count: usize,
}

impl InputEnvelope {
    pub fn geometry() -> Self {
        Self { kind: EnvelopeKind::Geometry, properties: None, id: None, geometry_count: 1 }
    }

    pub fn feature(properties: Option<JsonObject>, id: Option<Id>) -> Self {
        Self { kind: EnvelopeKind::Feature, properties, id, geometry_count: 1 }
    }

    pub fn feature_collection(geometry_count: usize) -> Self {
        Self { kind: EnvelopeKind::FeatureCollection, properties: None, id: None, geometry_count }
    }
}
