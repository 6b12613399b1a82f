//! Linear extrusion of planar geometry along a vector.
//!
//! Points sweep into vertical segments, lines into wall surfaces and
//! polygons into closed solids bounded by a bottom cap, a top cap and one
//! quad per boundary edge. Shells are oriented counter-clockwise and holes
//! clockwise before sweeping so every face points away from the solid.
//! The base of each vertex sits at the Z it had in the input.

use geo::orient::{Direction, Orient};
use geo::{Coord, Geometry, LineString, Polygon};
use geoproc_core::ports::{EngineFailure, EngineResult};

use crate::shape::{Coord3, Elevation, Facet, Shape};

pub fn extrude(geometry: &Geometry<f64>, elevation: &Elevation, vector: Coord3) -> EngineResult<Shape> {
    if vector.iter().any(|v| !v.is_finite()) {
        return Err(EngineFailure::new(format!("extrusion vector must be finite, got {:?}", vector)));
    }
    if vector == [0.0, 0.0, 0.0] {
        return Err(EngineFailure::new("extrusion vector must not be zero"));
    }

    let sweep = Sweep { elevation, vector };
    Ok(sweep.geometry(geometry))
}

struct Sweep<'a> {
    elevation: &'a Elevation,
    vector: Coord3,
}

impl Sweep<'_> {
    fn geometry(&self, geometry: &Geometry<f64>) -> Shape {
        match geometry {
            Geometry::Point(p) => Shape::Lines(vec![self.segment(p.0)]),
            Geometry::MultiPoint(mp) => Shape::Lines(mp.iter().map(|p| self.segment(p.0)).collect()),
            Geometry::Line(l) => Shape::Surface(self.walls(&LineString::new(vec![l.start, l.end]))),
            Geometry::LineString(ls) => Shape::Surface(self.walls(ls)),
            Geometry::MultiLineString(mls) => {
                Shape::Surface(mls.iter().flat_map(|ls| self.walls(ls)).collect())
            }
            Geometry::Polygon(p) => Shape::Surface(self.solid(p)),
            Geometry::MultiPolygon(mp) => Shape::Surface(mp.iter().flat_map(|p| self.solid(p)).collect()),
            Geometry::Rect(r) => Shape::Surface(self.solid(&r.to_polygon())),
            Geometry::Triangle(t) => Shape::Surface(self.solid(&t.to_polygon())),
            Geometry::GeometryCollection(gc) => {
                Shape::Collection(gc.iter().map(|member| self.geometry(member)).collect())
            }
        }
    }

    fn base(&self, coord: Coord<f64>) -> Coord3 {
        self.elevation.lift(coord)
    }

    fn translate(&self, [x, y, z]: Coord3) -> Coord3 {
        [x + self.vector[0], y + self.vector[1], z + self.vector[2]]
    }

    fn segment(&self, coord: Coord<f64>) -> Vec<Coord3> {
        let base = self.base(coord);
        vec![base, self.translate(base)]
    }

    /// One quad per non-degenerate segment of `line`
    fn walls(&self, line: &LineString<f64>) -> Vec<Facet> {
        line.lines()
            .filter(|segment| segment.start != segment.end)
            .map(|segment| {
                let a = self.base(segment.start);
                let b = self.base(segment.end);
                vec![vec![a, b, self.translate(b), self.translate(a), a]]
            })
            .collect()
    }

    fn solid(&self, polygon: &Polygon<f64>) -> Vec<Facet> {
        if polygon.exterior().0.is_empty() {
            return Vec::new();
        }
        let polygon = polygon.orient(Direction::Default);
        let rings: Vec<&LineString<f64>> =
            std::iter::once(polygon.exterior()).chain(polygon.interiors()).collect();

        let bottom: Facet = rings
            .iter()
            .map(|ring| ring.coords().rev().map(|c| self.base(*c)).collect())
            .collect();
        let top: Facet = rings
            .iter()
            .map(|ring| ring.coords().map(|c| self.translate(self.base(*c))).collect())
            .collect();

        let mut facets = vec![bottom, top];
        for ring in rings {
            facets.extend(self.walls(ring));
        }
        facets
    }
}
