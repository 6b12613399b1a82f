//! Operation dispatch over a geometry engine.

use geojson::GeoJson;
use serde_json::Value;

use crate::error::{GeoprocError, Result};
use crate::models::{Operation, OperationParams, ProcessingDefaults};
use crate::normalize::{normalize_input, normalize_output};
use crate::ports::{EngineResult, GeometryEngine};

/// Runs registered operations on GeoJSON payloads through an engine.
///
/// A processor built with [`Processor::without_engine`] rejects every
/// request with [`GeoprocError::EngineUnavailable`].
#[derive(Debug, Clone)]
pub struct Processor<E> {
    engine: Option<E>,
    defaults: ProcessingDefaults,
}

impl<E: GeometryEngine> Processor<E> {
    pub fn new(engine: E) -> Self {
        Self { engine: Some(engine), defaults: ProcessingDefaults::default() }
    }

    pub fn without_engine() -> Self {
        Self { engine: None, defaults: ProcessingDefaults::default() }
    }

    pub fn with_defaults(mut self, defaults: ProcessingDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &ProcessingDefaults {
        &self.defaults
    }

    pub fn is_engine_available(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine_name(&self) -> Option<&str> {
        self.engine.as_ref().map(|engine| engine.name())
    }

    /// Delaunay triangulation of every vertex in the input
    pub fn delaunay_triangulation(&self, geojson: &Value) -> Result<GeoJson> {
        self.run(Operation::Triangulate2dz, geojson, |engine, geometry| {
            engine.triangulate_2dz(geometry)
        })
    }

    /// Straight skeleton of polygonal input
    pub fn straight_skeleton(&self, geojson: &Value) -> Result<GeoJson> {
        self.run(Operation::StraightSkeleton, geojson, |engine, geometry| {
            engine.straight_skeleton(geometry)
        })
    }

    /// Offset polygon: positive distances grow the input, negative ones shrink it
    pub fn offset_polygon(&self, geojson: &Value, distance: f64) -> Result<GeoJson> {
        self.run(Operation::OffsetPolygon, geojson, |engine, geometry| {
            engine.offset_polygon(geometry, distance)
        })
    }

    /// Extrude along +Z by `height`
    pub fn extrude(&self, geojson: &Value, height: f64) -> Result<GeoJson> {
        self.run(Operation::Extrude, geojson, |engine, geometry| {
            engine.extrude(geometry, 0.0, 0.0, height)
        })
    }

    /// Look up `operation` by name and run it with parameters taken from `params`.
    pub fn process(&self, operation: &str, geojson: &Value, params: Option<&Value>) -> Result<GeoJson> {
        self.engine()?;

        let operation: Operation = operation.parse()?;
        let params = OperationParams::from_json(params);

        match operation {
            Operation::Triangulate2dz => self.delaunay_triangulation(geojson),
            Operation::StraightSkeleton => self.straight_skeleton(geojson),
            Operation::OffsetPolygon => {
                let distance = params.for_operation(operation)?;
                let distance = distance.unwrap_or(self.defaults.offset_distance);
                self.offset_polygon(geojson, distance)
            }
            Operation::Extrude => {
                let height = params.for_operation(operation)?;
                let height = height.unwrap_or(self.defaults.extrude_height);
                self.extrude(geojson, height)
            }
        }
    }

    fn engine(&self) -> Result<&E> {
        self.engine.as_ref().ok_or_else(|| GeoprocError::EngineUnavailable {
            reason: "no geometry engine is configured".to_string(),
        })
    }

    fn run<F>(&self, operation: Operation, geojson: &Value, call: F) -> Result<GeoJson>
    where
        F: FnOnce(&E, &E::Geometry) -> EngineResult<E::Geometry>,
    {
        let engine = self.engine()?;

        let (geometry, envelope) = normalize_input(engine, geojson)?;
        tracing::info!(
            operation = %operation,
            envelope = %envelope.kind,
            geometries = envelope.geometry_count,
            engine = engine.name(),
            "Processing geometry"
        );

        if let Some(reason) = engine.validity_detail(&geometry) {
            tracing::warn!(operation = %operation, reason = %reason, "Rejecting invalid geometry");
            return Err(GeoprocError::InvalidGeometry { reason });
        }

        let result = call(engine, &geometry).map_err(|failure| {
            tracing::warn!(operation = %operation, reason = %failure, "Engine returned no result");
            GeoprocError::OperationFailed { operation, reason: failure.reason }
        })?;

        let output = engine
            .to_geojson(&result)
            .map_err(|e| GeoprocError::Conversion { reason: e.reason })?;

        Ok(normalize_output(output, Some(&envelope), self.defaults.preserve_properties))
    }
}
