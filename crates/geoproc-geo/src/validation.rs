use geo::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{CoordsIter, Geometry, InteriorPoint, Line, LineString, MultiPolygon, Polygon};

use crate::shape::{geometry_type_name, Elevation};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// Reason of the first error, formatted with its location
    pub fn first_reason(&self) -> Option<String> {
        self.errors.first().map(|e| format!("{}: {}", e.location, e.reason))
    }
}

/// Validate a planar geometry and the Z values recorded for it.
///
/// Follows the OGC simple feature rules: finite coordinates, lines with
/// two distinct points, closed rings of at least four points that do not
/// self-intersect, holes inside their shell and polygons of a multipolygon
/// with disjoint interiors.
pub fn validate_geometry(geometry: &Geometry<f64>, elevation: &Elevation) -> ValidationResult {
    let mut result = ValidationResult::valid();
    let location = geometry_type_name(geometry).to_string();

    visit(geometry, location.clone(), &mut result);
    if elevation.values().any(|z| !z.is_finite()) {
        result.add_error(location, "Z coordinates must be finite".to_string());
    }

    result
}

fn visit(geometry: &Geometry<f64>, location: String, result: &mut ValidationResult) {
    if geometry.coords_iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        result.add_error(location, "Coordinates must be finite".to_string());
        return;
    }

    match geometry {
        Geometry::LineString(line) => validate_line_string(line, location, result),
        Geometry::MultiLineString(lines) => {
            for (i, line) in lines.iter().enumerate() {
                validate_line_string(line, format!("{}[{}]", location, i), result);
            }
        }
        Geometry::Polygon(polygon) => validate_polygon(polygon, &location, result),
        Geometry::MultiPolygon(polygons) => validate_multi_polygon(polygons, &location, result),
        Geometry::GeometryCollection(members) => {
            for (i, member) in members.iter().enumerate() {
                let member_location =
                    format!("{}[{}].{}", location, i, geometry_type_name(member));
                visit(member, member_location, result);
            }
        }
        Geometry::Point(_)
        | Geometry::MultiPoint(_)
        | Geometry::Line(_)
        | Geometry::Rect(_)
        | Geometry::Triangle(_) => {}
    }
}

fn validate_line_string(line: &LineString<f64>, location: String, result: &mut ValidationResult) {
    if line.0.is_empty() {
        return;
    }
    if line.0.windows(2).all(|pair| pair[0] == pair[1]) {
        result.add_error(location, "LineString must have at least 2 distinct points".to_string());
    }
}

fn validate_polygon(polygon: &Polygon<f64>, location: &str, result: &mut ValidationResult) {
    if polygon.exterior().0.is_empty() {
        if !polygon.interiors().is_empty() {
            result.add_error(location.to_string(), "Holes without an exterior ring".to_string());
        }
        return;
    }

    let holes = polygon.interiors().iter().enumerate();
    let rings: Vec<(String, &LineString<f64>)> =
        std::iter::once(("exterior".to_string(), polygon.exterior()))
            .chain(holes.map(|(i, ring)| (format!("interior[{}]", i), ring)))
            .collect();

    let mut rings_ok = true;
    for (name, ring) in &rings {
        let ring_location = format!("{}.{}", location, name);
        if ring.0.len() < 4 {
            result.add_error(
                ring_location,
                format!("Ring must have at least 4 points, found {}", ring.0.len()),
            );
            rings_ok = false;
        } else if let Some(reason) = self_intersection(ring) {
            result.add_error(ring_location, reason);
            rings_ok = false;
        }
    }
    if !rings_ok {
        return;
    }

    for (i, (name_a, ring_a)) in rings.iter().enumerate() {
        for (name_b, ring_b) in &rings[i + 1..] {
            if rings_cross(ring_a, ring_b) {
                result.add_error(
                    location.to_string(),
                    format!("Rings {} and {} cross", name_a, name_b),
                );
            }
        }
    }

    let shell = Polygon::new(polygon.exterior().clone(), vec![]);
    for (i, hole) in polygon.interiors().iter().enumerate() {
        if hole.coords().any(|c| shell.coordinate_position(c) == CoordPos::Outside) {
            result.add_error(
                format!("{}.interior[{}]", location, i),
                "Hole lies outside the exterior ring".to_string(),
            );
        }
    }
}

fn validate_multi_polygon(polygons: &MultiPolygon<f64>, location: &str, result: &mut ValidationResult) {
    let before = result.errors.len();
    for (i, polygon) in polygons.iter().enumerate() {
        validate_polygon(polygon, &format!("{}[{}]", location, i), result);
    }
    // Overlap tests assume each member is a valid polygon
    if result.errors.len() > before {
        return;
    }

    for (i, a) in polygons.iter().enumerate() {
        for (j, b) in polygons.iter().enumerate().skip(i + 1) {
            if polygons_overlap(a, b) {
                result.add_error(
                    location.to_string(),
                    format!("Polygons {} and {} overlap", i, j),
                );
            }
        }
    }
}

/// Describe the first place a ring touches or crosses itself
fn self_intersection(ring: &LineString<f64>) -> Option<String> {
    let segments = segments(ring);
    let n = segments.len();

    for i in 0..n {
        for j in i + 1..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match line_intersection(segments[i], segments[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { .. }) if adjacent => {}
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    return Some(format!(
                        "Ring self-intersects at ({}, {})",
                        intersection.x, intersection.y
                    ));
                }
                Some(LineIntersection::Collinear { intersection }) => {
                    if adjacent && intersection.start == intersection.end {
                        continue;
                    }
                    return Some(format!(
                        "Ring has overlapping segments at ({}, {})",
                        intersection.start.x, intersection.start.y
                    ));
                }
            }
        }
    }
    None
}

/// Rings may touch at points but never cross or share an edge
fn rings_cross(a: &LineString<f64>, b: &LineString<f64>) -> bool {
    let b_segments = segments(b);
    segments(a).into_iter().any(|sa| {
        b_segments.iter().any(|&sb| match line_intersection(sa, sb) {
            Some(LineIntersection::SinglePoint { is_proper, .. }) => is_proper,
            Some(LineIntersection::Collinear { intersection }) => intersection.start != intersection.end,
            None => false,
        })
    })
}

fn polygons_overlap(a: &Polygon<f64>, b: &Polygon<f64>) -> bool {
    let inside = |polygon: &Polygon<f64>, other: &Polygon<f64>| {
        other.exterior().coords().any(|c| polygon.coordinate_position(c) == CoordPos::Inside)
            || other
                .interior_point()
                .is_some_and(|p| polygon.coordinate_position(&p.0) == CoordPos::Inside)
    };
    inside(a, b) || inside(b, a) || rings_cross(a.exterior(), b.exterior())
}

/// Segments of a ring with repeated points dropped
fn segments(ring: &LineString<f64>) -> Vec<Line<f64>> {
    ring.lines().filter(|line| line.start != line.end).collect()
}
