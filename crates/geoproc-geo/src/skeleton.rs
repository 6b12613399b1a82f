//! Straight skeleton of polygonal areas via `geo-buf`.

use geo::orient::{Direction, Orient};
use geo::{Geometry, MultiLineString, MultiPolygon, Polygon};
use geo_buf::skeleton_of_multi_polygon_to_linestring;
use geoproc_core::ports::{EngineFailure, EngineResult};

use crate::shape::geometry_type_name;

/// Interior straight skeleton of every polygon in `geometry`.
///
/// Each skeleton segment is returned as its own two-point line. Only
/// polygonal input is accepted; a geometry collection qualifies when all
/// of its members are polygonal.
pub fn straight_skeleton(geometry: &Geometry<f64>) -> EngineResult<MultiLineString<f64>> {
    let polygons = polygons_of(geometry)?;
    if polygons.0.is_empty() {
        return Ok(MultiLineString::new(vec![]));
    }

    // geo-buf expects counter-clockwise shells and clockwise holes
    let oriented = polygons.orient(Direction::Default);
    let segments = skeleton_of_multi_polygon_to_linestring(&oriented, true);

    tracing::debug!(
        polygons = oriented.0.len(),
        segments = segments.len(),
        "Computed straight skeleton"
    );

    Ok(MultiLineString::new(segments))
}

fn polygons_of(geometry: &Geometry<f64>) -> EngineResult<MultiPolygon<f64>> {
    let mut polygons = Vec::new();
    collect_polygons(geometry, &mut polygons)?;
    Ok(MultiPolygon::new(polygons))
}

fn collect_polygons(geometry: &Geometry<f64>, out: &mut Vec<Polygon<f64>>) -> EngineResult<()> {
    match geometry {
        Geometry::Polygon(p) => out.push(p.clone()),
        Geometry::MultiPolygon(mp) => out.extend(mp.iter().cloned()),
        Geometry::Rect(r) => out.push(r.to_polygon()),
        Geometry::Triangle(t) => out.push(t.to_polygon()),
        Geometry::GeometryCollection(gc) => {
            for member in gc.iter() {
                collect_polygons(member, out)?;
            }
        }
        other => {
            return Err(EngineFailure::new(format!(
                "straight skeleton requires polygonal input, got {}",
                geometry_type_name(other)
            )))
        }
    }
    Ok(())
}
