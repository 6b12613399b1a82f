//! Port trait definitions
//!
//! The geometry engine is the only external dependency of the processing
//! layer. Adapters implement [`GeometryEngine`] over their own geometry type.

use std::fmt;

/// The engine's "no result" signal, carrying whatever reason it reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineFailure {
    pub reason: String,
}

impl EngineFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl fmt::Display for EngineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for EngineFailure {}

pub type EngineResult<T> = std::result::Result<T, EngineFailure>;

/// A computational-geometry engine able to run the four registered operations.
pub trait GeometryEngine: Send + Sync {
    /// The engine's native geometry representation
    type Geometry: Clone + fmt::Debug + Send;

    /// Human readable engine name, used in diagnostics
    fn name(&self) -> &str;

    /// Build a native geometry from a GeoJSON geometry object
    fn from_geojson(&self, geometry: &geojson::Geometry) -> EngineResult<Self::Geometry>;

    /// Group several native geometries into one collection
    fn collect(&self, geometries: Vec<Self::Geometry>) -> Self::Geometry;

    /// Serialize a native geometry back to a GeoJSON geometry object
    fn to_geojson(&self, geometry: &Self::Geometry) -> EngineResult<geojson::Geometry>;

    /// `None` if the geometry is valid, otherwise the first reason it is not
    fn validity_detail(&self, geometry: &Self::Geometry) -> Option<String>;

    fn triangulate_2dz(&self, geometry: &Self::Geometry) -> EngineResult<Self::Geometry>;

    fn straight_skeleton(&self, geometry: &Self::Geometry) -> EngineResult<Self::Geometry>;

    fn offset_polygon(
        &self,
        geometry: &Self::Geometry,
        distance: f64,
    ) -> EngineResult<Self::Geometry>;

    fn extrude(
        &self,
        geometry: &Self::Geometry,
        dx: f64,
        dy: f64,
        dz: f64,
    ) -> EngineResult<Self::Geometry>;
}
