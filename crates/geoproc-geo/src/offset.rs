//! Polygon offsetting via `geo-buf`.
//!
//! geo-buf offsets polygons along their straight skeleton. It has no notion
//! of buffering points or lines, so those are grown here as discs and
//! capsules and merged with the polygonal part.

use geo::orient::{Direction, Orient};
use geo::{BooleanOps, Coord, Geometry, Line, LineString, MultiPolygon, Point, Polygon};
use geo_buf::{buffer_multi_polygon_rounded, buffer_point};
use geoproc_core::ports::{EngineFailure, EngineResult};

/// Vertices used to approximate a disc around a point
const DISC_RESOLUTION: usize = 32;

/// Grow (positive distance) or shrink (negative distance) a geometry.
///
/// Points and lines only grow; shrinking them yields an empty result.
pub fn offset_polygon(geometry: &Geometry<f64>, distance: f64) -> EngineResult<MultiPolygon<f64>> {
    if !distance.is_finite() {
        return Err(EngineFailure::new(format!("offset distance must be finite, got {}", distance)));
    }

    let mut parts = Parts::default();
    parts.collect(geometry);

    let mut pieces = Vec::new();
    if !parts.polygons.is_empty() {
        // geo-buf expects counter-clockwise shells and clockwise holes
        let oriented = MultiPolygon::new(parts.polygons).orient(Direction::Default);
        pieces.push(buffer_multi_polygon_rounded(&oriented, distance));
    }
    if distance > 0.0 {
        pieces.extend(parts.points.iter().map(|&p| MultiPolygon::new(vec![disc(p, distance)])));
        pieces.extend(parts.segments.iter().map(|&s| capsule(s, distance)));
    }

    let result = pieces
        .into_iter()
        .reduce(|merged, piece| merged.union(&piece))
        .unwrap_or_else(|| MultiPolygon::new(vec![]));

    tracing::debug!(distance, polygons = result.0.len(), "Computed offset polygon");
    Ok(result)
}

#[derive(Default)]
struct Parts {
    polygons: Vec<Polygon<f64>>,
    points: Vec<Point<f64>>,
    segments: Vec<Line<f64>>,
}

impl Parts {
    fn collect(&mut self, geometry: &Geometry<f64>) {
        match geometry {
            Geometry::Point(p) => self.points.push(*p),
            Geometry::MultiPoint(mp) => self.points.extend(mp.iter().copied()),
            Geometry::Line(line) => self.segments.push(*line),
            Geometry::LineString(line) => self.add_line(line),
            Geometry::MultiLineString(lines) => lines.iter().for_each(|line| self.add_line(line)),
            Geometry::Polygon(p) => self.polygons.push(p.clone()),
            Geometry::MultiPolygon(mp) => self.polygons.extend(mp.iter().cloned()),
            Geometry::Rect(r) => self.polygons.push(r.to_polygon()),
            Geometry::Triangle(t) => self.polygons.push(t.to_polygon()),
            Geometry::GeometryCollection(gc) => gc.iter().for_each(|member| self.collect(member)),
        }
    }

    fn add_line(&mut self, line: &LineString<f64>) {
        match line.0.as_slice() {
            [] => {}
            [single] => self.points.push(Point(*single)),
            _ => self.segments.extend(line.lines()),
        }
    }
}

fn disc(center: Point<f64>, radius: f64) -> Polygon<f64> {
    buffer_point(&center, radius, DISC_RESOLUTION)
}

/// Segment grown by `distance` on every side, with round ends
fn capsule(segment: Line<f64>, distance: f64) -> MultiPolygon<f64> {
    let Coord { x: dx, y: dy } = segment.delta();
    let length = dx.hypot(dy);
    let ends = MultiPolygon::new(vec![
        disc(segment.start.into(), distance),
        disc(segment.end.into(), distance),
    ]);
    if length == 0.0 {
        return ends;
    }

    let normal = Coord { x: -dy / length * distance, y: dx / length * distance };
    let body = Polygon::new(
        LineString::from(vec![
            segment.start + normal,
            segment.start - normal,
            segment.end - normal,
            segment.end + normal,
        ]),
        vec![],
    );
    ends.union(&MultiPolygon::new(vec![body]))
}
