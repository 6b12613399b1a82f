//! Native geometry representation of the bundled engine.
//!
//! `geo` types are strictly 2D, so planar geometries travel together with an
//! [`Elevation`] lookup holding the Z value of every input vertex that had
//! one. Results that are genuinely three dimensional (triangulated and
//! extruded surfaces, vertical segments) are stored as explicit 3D rings.

use geo::{Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPolygon, Polygon};
use std::collections::HashMap;

pub type Coord3 = [f64; 3];

/// A planar face in space: a closed exterior ring followed by closed holes
pub type Facet = Vec<Vec<Coord3>>;

/// Z values keyed by the exact XY position of the vertex
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Elevation(HashMap<(u64, u64), f64>);

impl Elevation {
    /// Record `z` for `(x, y)`; the first value recorded for a position wins
    pub fn record(&mut self, x: f64, y: f64, z: f64) {
        self.0.entry(key(x, y)).or_insert(z);
    }

    /// Z for a coordinate, 0 when the input carried none
    pub fn z_at(&self, coord: Coord<f64>) -> f64 {
        self.0.get(&key(coord.x, coord.y)).copied().unwrap_or(0.0)
    }

    pub fn lift(&self, coord: Coord<f64>) -> Coord3 {
        [coord.x, coord.y, self.z_at(coord)]
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }

    pub fn merge(&mut self, other: Elevation) {
        for (position, z) in other.0 {
            self.0.entry(position).or_insert(z);
        }
    }
}

fn key(x: f64, y: f64) -> (u64, u64) {
    // -0.0 and 0.0 name the same position
    let x = if x == 0.0 { 0.0 } else { x };
    let y = if y == 0.0 { 0.0 } else { y };
    (x.to_bits(), y.to_bits())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// 2D geometry with the Z of its input vertices
    Planar { geometry: Geometry<f64>, elevation: Elevation },
    /// Polyhedral or triangulated surface
    Surface(Vec<Facet>),
    /// Polylines in space
    Lines(Vec<Vec<Coord3>>),
    /// Heterogeneous results, one per input member
    Collection(Vec<Shape>),
}

impl Shape {
    /// A planar shape without elevation
    pub fn planar(geometry: impl Into<Geometry<f64>>) -> Self {
        Shape::Planar { geometry: geometry.into(), elevation: Elevation::default() }
    }

    /// Group shapes into one planar geometry collection
    pub fn collect(shapes: Vec<Shape>) -> Self {
        let mut elevation = Elevation::default();
        let members = shapes
            .into_iter()
            .map(|shape| {
                let (geometry, member_elevation) = shape.into_planar();
                elevation.merge(member_elevation);
                geometry
            })
            .collect();

        Shape::Planar { geometry: Geometry::GeometryCollection(GeometryCollection(members)), elevation }
    }

    /// Project onto the XY plane, keeping Z in the elevation lookup
    pub fn into_planar(self) -> (Geometry<f64>, Elevation) {
        match self {
            Shape::Planar { geometry, elevation } => (geometry, elevation),
            Shape::Surface(facets) => {
                let mut elevation = Elevation::default();
                let polygons = facets
                    .iter()
                    .map(|facet| {
                        let mut rings = facet.iter().map(|ring| project(ring, &mut elevation));
                        let exterior = rings.next().unwrap_or_else(|| LineString::new(vec![]));
                        Polygon::new(exterior, rings.collect())
                    })
                    .collect();
                (Geometry::MultiPolygon(MultiPolygon::new(polygons)), elevation)
            }
            Shape::Lines(lines) => {
                let mut elevation = Elevation::default();
                let lines = lines.iter().map(|line| project(line, &mut elevation)).collect();
                (Geometry::MultiLineString(MultiLineString::new(lines)), elevation)
            }
            Shape::Collection(shapes) => Shape::collect(shapes).into_planar(),
        }
    }

    /// GeoJSON-style type name, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Planar { geometry, .. } => geometry_type_name(geometry),
            Shape::Surface(_) => "PolyhedralSurface",
            Shape::Lines(_) => "MultiLineString",
            Shape::Collection(_) => "GeometryCollection",
        }
    }
}

fn project(points: &[Coord3], elevation: &mut Elevation) -> LineString<f64> {
    points
        .iter()
        .map(|&[x, y, z]| {
            elevation.record(x, y, z);
            Coord { x, y }
        })
        .collect()
}

pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
