//! GeoJSON <-> [`Shape`] conversion.

use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use geojson::Value;
use geoproc_core::ports::{EngineFailure, EngineResult};

use crate::shape::{Coord3, Elevation, Facet, Shape};

type Position = Vec<f64>;

/// Build a planar shape from a GeoJSON geometry, recording any Z values
pub fn shape_from_geojson(geometry: &geojson::Geometry) -> EngineResult<Shape> {
    let mut elevation = Elevation::default();
    let geometry = geometry_from_value(&geometry.value, &mut elevation)?;
    Ok(Shape::Planar { geometry, elevation })
}

fn geometry_from_value(value: &Value, elevation: &mut Elevation) -> EngineResult<Geometry<f64>> {
    let geometry = match value {
        Value::Point(position) => Geometry::Point(Point::from(coord(position, elevation)?)),
        Value::MultiPoint(positions) => {
            let points = positions
                .iter()
                .map(|p| coord(p, elevation).map(Point::from))
                .collect::<EngineResult<Vec<_>>>()?;
            Geometry::MultiPoint(MultiPoint::new(points))
        }
        Value::LineString(positions) => Geometry::LineString(line_string(positions, elevation)?),
        Value::MultiLineString(lines) => {
            let lines = lines
                .iter()
                .map(|line| line_string(line, elevation))
                .collect::<EngineResult<Vec<_>>>()?;
            Geometry::MultiLineString(MultiLineString::new(lines))
        }
        Value::Polygon(rings) => Geometry::Polygon(polygon(rings, elevation)?),
        Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .iter()
                .map(|rings| polygon(rings, elevation))
                .collect::<EngineResult<Vec<_>>>()?;
            Geometry::MultiPolygon(MultiPolygon::new(polygons))
        }
        Value::GeometryCollection(members) => {
            let members = members
                .iter()
                .map(|member| geometry_from_value(&member.value, elevation))
                .collect::<EngineResult<Vec<_>>>()?;
            Geometry::GeometryCollection(GeometryCollection(members))
        }
    };
    Ok(geometry)
}

fn coord(position: &[f64], elevation: &mut Elevation) -> EngineResult<Coord<f64>> {
    match position {
        [x, y] => Ok(Coord { x: *x, y: *y }),
        [x, y, z, ..] => {
            elevation.record(*x, *y, *z);
            Ok(Coord { x: *x, y: *y })
        }
        _ => Err(EngineFailure::new(format!(
            "position must have at least two coordinates, found {}",
            position.len()
        ))),
    }
}

fn line_string(positions: &[Position], elevation: &mut Elevation) -> EngineResult<LineString<f64>> {
    let coords = positions
        .iter()
        .map(|p| coord(p, elevation))
        .collect::<EngineResult<Vec<_>>>()?;
    Ok(LineString::new(coords))
}

fn polygon(rings: &[Vec<Position>], elevation: &mut Elevation) -> EngineResult<Polygon<f64>> {
    let mut rings = rings
        .iter()
        .map(|ring| line_string(ring, elevation))
        .collect::<EngineResult<Vec<_>>>()?
        .into_iter();

    let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Serialize a shape as a GeoJSON geometry.
///
/// Planar shapes are written with Z only if their input carried Z.
pub fn shape_to_geojson(shape: &Shape) -> EngineResult<geojson::Geometry> {
    let value = shape_value(shape)?;
    Ok(geojson::Geometry::new(value))
}

fn shape_value(shape: &Shape) -> EngineResult<Value> {
    match shape {
        Shape::Planar { geometry, elevation } => {
            let writer = PositionWriter { elevation: (!elevation.is_empty()).then_some(elevation) };
            writer.value(geometry)
        }
        Shape::Surface(facets) => {
            let polygons = facets.iter().map(facet_rings).collect::<EngineResult<Vec<_>>>()?;
            Ok(Value::MultiPolygon(polygons))
        }
        Shape::Lines(lines) => {
            let mut lines =
                lines.iter().map(|line| positions3(line)).collect::<EngineResult<Vec<_>>>()?;
            if lines.len() == 1 {
                Ok(Value::LineString(lines.remove(0)))
            } else {
                Ok(Value::MultiLineString(lines))
            }
        }
        Shape::Collection(shapes) => {
            let members = shapes
                .iter()
                .map(shape_to_geojson)
                .collect::<EngineResult<Vec<_>>>()?;
            Ok(Value::GeometryCollection(members))
        }
    }
}

fn facet_rings(facet: &Facet) -> EngineResult<Vec<Vec<Position>>> {
    facet.iter().map(|ring| positions3(ring)).collect()
}

fn positions3(points: &[Coord3]) -> EngineResult<Vec<Position>> {
    points
        .iter()
        .map(|point| {
            if point.iter().all(|v| v.is_finite()) {
                Ok(point.to_vec())
            } else {
                Err(non_finite())
            }
        })
        .collect()
}

fn non_finite() -> EngineFailure {
    EngineFailure::new("result contains non-finite coordinates")
}

struct PositionWriter<'a> {
    elevation: Option<&'a Elevation>,
}

impl PositionWriter<'_> {
    fn value(&self, geometry: &Geometry<f64>) -> EngineResult<Value> {
        let value = match geometry {
            Geometry::Point(p) => Value::Point(self.position(p.0)?),
            Geometry::Line(l) => Value::LineString(vec![self.position(l.start)?, self.position(l.end)?]),
            Geometry::LineString(ls) => Value::LineString(self.line(ls)?),
            Geometry::Polygon(p) => Value::Polygon(self.rings(p)?),
            Geometry::MultiPoint(mp) => {
                Value::MultiPoint(mp.iter().map(|p| self.position(p.0)).collect::<EngineResult<_>>()?)
            }
            Geometry::MultiLineString(mls) => {
                Value::MultiLineString(mls.iter().map(|ls| self.line(ls)).collect::<EngineResult<_>>()?)
            }
            Geometry::MultiPolygon(mp) => {
                Value::MultiPolygon(mp.iter().map(|p| self.rings(p)).collect::<EngineResult<_>>()?)
            }
            Geometry::GeometryCollection(gc) => Value::GeometryCollection(
                gc.iter()
                    .map(|member| self.value(member).map(geojson::Geometry::new))
                    .collect::<EngineResult<_>>()?,
            ),
            Geometry::Rect(r) => Value::Polygon(self.rings(&r.to_polygon())?),
            Geometry::Triangle(t) => Value::Polygon(self.rings(&t.to_polygon())?),
        };
        Ok(value)
    }

    fn position(&self, coord: Coord<f64>) -> EngineResult<Position> {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            return Err(non_finite());
        }
        Ok(match self.elevation {
            Some(elevation) => vec![coord.x, coord.y, elevation.z_at(coord)],
            None => vec![coord.x, coord.y],
        })
    }

    fn line(&self, line: &LineString<f64>) -> EngineResult<Vec<Position>> {
        line.coords().map(|c| self.position(*c)).collect()
    }

    fn rings(&self, polygon: &Polygon<f64>) -> EngineResult<Vec<Vec<Position>>> {
        std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .filter(|ring| !ring.0.is_empty())
            .map(|ring| self.line(ring))
            .collect()
    }
}
