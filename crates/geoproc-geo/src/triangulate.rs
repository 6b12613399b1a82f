//! Constrained Delaunay triangulation through spade.
//!
//! Every vertex of the input becomes a triangulation vertex and every line
//! or ring segment becomes a constraint edge. The result covers the convex
//! hull of the input; each vertex keeps the Z it was given.

use geo::{Coord, Geometry, LineString, Polygon};
use geoproc_core::ports::{EngineFailure, EngineResult};
use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation};
use std::collections::HashMap;

use crate::shape::{Coord3, Elevation, Facet};

pub fn triangulate_2dz(geometry: &Geometry<f64>, elevation: &Elevation) -> EngineResult<Vec<Facet>> {
    let mut builder = Builder {
        cdt: ConstrainedDelaunayTriangulation::new(),
        heights: HashMap::new(),
        elevation,
        skipped_constraints: 0,
    };
    builder.add_geometry(geometry)?;

    if builder.skipped_constraints > 0 {
        tracing::debug!(
            skipped = builder.skipped_constraints,
            "Dropped constraint edges crossing earlier constraints"
        );
    }

    Ok(builder.facets())
}

struct Builder<'a> {
    cdt: ConstrainedDelaunayTriangulation<Point2<f64>>,
    heights: HashMap<usize, f64>,
    elevation: &'a Elevation,
    skipped_constraints: usize,
}

impl Builder<'_> {
    fn add_geometry(&mut self, geometry: &Geometry<f64>) -> EngineResult<()> {
        match geometry {
            Geometry::Point(p) => {
                self.vertex(p.0)?;
            }
            Geometry::Line(l) => self.chain(&LineString::new(vec![l.start, l.end]))?,
            Geometry::LineString(ls) => self.chain(ls)?,
            Geometry::Polygon(p) => self.polygon(p)?,
            Geometry::MultiPoint(mp) => {
                for p in mp.iter() {
                    self.vertex(p.0)?;
                }
            }
            Geometry::MultiLineString(mls) => {
                for ls in mls.iter() {
                    self.chain(ls)?;
                }
            }
            Geometry::MultiPolygon(mp) => {
                for p in mp.iter() {
                    self.polygon(p)?;
                }
            }
            Geometry::GeometryCollection(gc) => {
                for member in gc.iter() {
                    self.add_geometry(member)?;
                }
            }
            Geometry::Rect(r) => self.polygon(&r.to_polygon())?,
            Geometry::Triangle(t) => self.polygon(&t.to_polygon())?,
        }
        Ok(())
    }

    fn polygon(&mut self, polygon: &Polygon<f64>) -> EngineResult<()> {
        self.chain(polygon.exterior())?;
        for interior in polygon.interiors() {
            self.chain(interior)?;
        }
        Ok(())
    }

    fn vertex(&mut self, coord: Coord<f64>) -> EngineResult<FixedVertexHandle> {
        let handle = self
            .cdt
            .insert(Point2::new(coord.x, coord.y))
            .map_err(|e| EngineFailure::new(format!("cannot insert vertex ({}, {}): {:?}", coord.x, coord.y, e)))?;
        let z = self.elevation.z_at(coord);
        self.heights.entry(handle.index()).or_insert(z);
        Ok(handle)
    }

    fn chain(&mut self, line: &LineString<f64>) -> EngineResult<()> {
        let handles = line
            .coords()
            .map(|c| self.vertex(*c))
            .collect::<EngineResult<Vec<_>>>()?;

        for pair in handles.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if from == to {
                continue;
            }
            if self.cdt.can_add_constraint(from, to) {
                self.cdt.add_constraint(from, to);
            } else {
                self.skipped_constraints += 1;
            }
        }
        Ok(())
    }

    fn facets(&self) -> Vec<Facet> {
        self.cdt
            .inner_faces()
            .map(|face| {
                let mut ring: Vec<Coord3> = face
                    .vertices()
                    .iter()
                    .map(|v| {
                        let p = v.position();
                        let z = self.heights.get(&v.fix().index()).copied().unwrap_or(0.0);
                        [p.x, p.y, z]
                    })
                    .collect();
                ring.push(ring[0]);
                vec![ring]
            })
            .collect()
    }
}
