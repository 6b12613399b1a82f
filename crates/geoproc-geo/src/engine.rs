use geoproc_core::ports::{EngineResult, GeometryEngine};

use crate::convert::{shape_from_geojson, shape_to_geojson};
use crate::extrude::extrude;
use crate::offset::offset_polygon;
use crate::shape::Shape;
use crate::skeleton::straight_skeleton;
use crate::triangulate::triangulate_2dz;
use crate::validation::validate_geometry;

/// Geometry engine built on the georust stack.
///
/// Triangulation uses spade and both straight skeletons and offsets use
/// geo-buf; extrusion is computed directly on the shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEngine;

impl GeoEngine {
    pub fn new() -> Self {
        Self
    }
}

impl GeometryEngine for GeoEngine {
    type Geometry = Shape;

    fn name(&self) -> &str {
        "geo"
    }

    fn from_geojson(&self, geometry: &geojson::Geometry) -> EngineResult<Shape> {
        shape_from_geojson(geometry)
    }

    fn collect(&self, geometries: Vec<Shape>) -> Shape {
        Shape::collect(geometries)
    }

    fn to_geojson(&self, geometry: &Shape) -> EngineResult<geojson::Geometry> {
        shape_to_geojson(geometry)
    }

    fn validity_detail(&self, geometry: &Shape) -> Option<String> {
        let (planar, elevation) = geometry.clone().into_planar();
        validate_geometry(&planar, &elevation).first_reason()
    }

    fn triangulate_2dz(&self, geometry: &Shape) -> EngineResult<Shape> {
        let (planar, elevation) = geometry.clone().into_planar();
        triangulate_2dz(&planar, &elevation).map(Shape::Surface)
    }

    fn straight_skeleton(&self, geometry: &Shape) -> EngineResult<Shape> {
        let (planar, _) = geometry.clone().into_planar();
        straight_skeleton(&planar).map(Shape::planar)
    }

    fn offset_polygon(&self, geometry: &Shape, distance: f64) -> EngineResult<Shape> {
        let (planar, _) = geometry.clone().into_planar();
        offset_polygon(&planar, distance).map(Shape::planar)
    }

    fn extrude(&self, geometry: &Shape, dx: f64, dy: f64, dz: f64) -> EngineResult<Shape> {
        let (planar, elevation) = geometry.clone().into_planar();
        extrude(&planar, &elevation, [dx, dy, dz])
    }
}
