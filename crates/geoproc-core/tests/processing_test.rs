//! Dispatch and envelope tests against a recording engine
//!
//! The engine here echoes its inputs, and encodes the numeric arguments of
//! offset and extrude calls as a point, so the tests can observe exactly
//! what the processor handed over and how the result was wrapped.

use geojson::{GeoJson, Value as GeoValue};
use geoproc_core::ports::{EngineFailure, EngineResult, GeometryEngine};
use geoproc_core::{GeoprocError, Operation, ProcessingDefaults, Processor};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default)]
struct RecordingEngine;

impl GeometryEngine for RecordingEngine {
    type Geometry = geojson::Geometry;

    fn name(&self) -> &str {
        "recording"
    }

    fn from_geojson(&self, geometry: &geojson::Geometry) -> EngineResult<Self::Geometry> {
        Ok(geometry.clone())
    }

    fn collect(&self, geometries: Vec<Self::Geometry>) -> Self::Geometry {
        geojson::Geometry::new(GeoValue::GeometryCollection(geometries))
    }

    fn to_geojson(&self, geometry: &Self::Geometry) -> EngineResult<geojson::Geometry> {
        Ok(geometry.clone())
    }

    fn validity_detail(&self, geometry: &Self::Geometry) -> Option<String> {
        match &geometry.value {
            GeoValue::Polygon(rings) if rings.iter().any(|ring| ring.len() < 4) => {
                Some("Too few points in ring".to_string())
            }
            _ => None,
        }
    }

    fn triangulate_2dz(&self, geometry: &Self::Geometry) -> EngineResult<Self::Geometry> {
        Ok(geometry.clone())
    }

    fn straight_skeleton(&self, geometry: &Self::Geometry) -> EngineResult<Self::Geometry> {
        match geometry.value {
            GeoValue::Polygon(_) => Ok(geometry.clone()),
            _ => Err(EngineFailure::new("input is not polygonal")),
        }
    }

    fn offset_polygon(&self, _geometry: &Self::Geometry, distance: f64) -> EngineResult<Self::Geometry> {
        Ok(geojson::Geometry::new(GeoValue::Point(vec![distance, 0.0])))
    }

    fn extrude(&self, _geometry: &Self::Geometry, dx: f64, dy: f64, dz: f64) -> EngineResult<Self::Geometry> {
        Ok(geojson::Geometry::new(GeoValue::Point(vec![dx, dy, dz])))
    }
}

fn processor() -> Processor<RecordingEngine> {
    Processor::new(RecordingEngine)
}

fn point_coords(result: GeoJson) -> Vec<f64> {
    match result {
        GeoJson::Geometry(geojson::Geometry { value: GeoValue::Point(coords), .. }) => coords,
        other => panic!("expected a bare point, got {:?}", other),
    }
}

fn square() -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]
    })
}

#[test]
fn test_operations_registered() {
    let names = Operation::names();
    for expected in ["triangulate_2dz", "straight_skeleton", "offset_polygon", "extrude"] {
        assert!(names.contains(&expected.to_string()));
    }
    assert_eq!(names.len(), 4);
}

#[test]
fn test_engine_unavailable() {
    let processor: Processor<RecordingEngine> = Processor::without_engine();
    assert!(!processor.is_engine_available());

    let err = processor.delaunay_triangulation(&square()).unwrap_err();
    assert!(matches!(err, GeoprocError::EngineUnavailable { .. }));

    // Availability is checked before the operation name
    let err = processor.process("unknown_operation", &square(), None).unwrap_err();
    assert!(matches!(err, GeoprocError::EngineUnavailable { .. }));
}

#[test]
fn test_unknown_operation() {
    let err = processor()
        .process("unknown_operation", &json!({"type": "Point", "coordinates": [0, 0]}), None)
        .unwrap_err();

    assert!(err.to_string().contains("Unknown operation"));
    assert!(matches!(err, GeoprocError::UnknownOperation { ref available, .. } if available.len() == 4));
}

#[test]
fn test_direct_geometry_returns_bare_geometry() {
    let result = processor().delaunay_triangulation(&square()).unwrap();
    let GeoJson::Geometry(geometry) = result else {
        panic!("expected a bare geometry");
    };
    assert!(matches!(geometry.value, GeoValue::Polygon(_)));
}

#[test]
fn test_feature_keeps_properties() {
    let input = json!({
        "type": "Feature",
        "id": 42,
        "geometry": square(),
        "properties": {"name": "block", "height": 3}
    });

    let result = processor().straight_skeleton(&input).unwrap();
    let GeoJson::Feature(feature) = result else {
        panic!("expected a Feature");
    };

    let props = feature.properties.unwrap();
    assert_eq!(props["name"], json!("block"));
    assert_eq!(props["height"], json!(3));
    assert_eq!(props["processed"], json!(true));
    assert!(feature.id.is_some());
}

#[test]
fn test_feature_with_null_properties() {
    let input = json!({"type": "Feature", "geometry": square(), "properties": null});

    let GeoJson::Feature(feature) = processor().delaunay_triangulation(&input).unwrap() else {
        panic!("expected a Feature");
    };
    let props = feature.properties.unwrap();
    assert_eq!(props.len(), 1);
    assert_eq!(props["processed"], json!(true));
}

#[test]
fn test_properties_dropped_when_not_preserving() {
    let processor = processor().with_defaults(ProcessingDefaults {
        preserve_properties: false,
        ..ProcessingDefaults::default()
    });
    let input = json!({"type": "Feature", "geometry": square(), "properties": {"name": "block"}});

    let GeoJson::Feature(feature) = processor.delaunay_triangulation(&input).unwrap() else {
        panic!("expected a Feature");
    };
    let props = feature.properties.unwrap();
    assert!(!props.contains_key("name"));
    assert_eq!(props["processed"], json!(true));
}

#[test]
fn test_feature_collection_of_points_becomes_collection() {
    let input = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0, 0]}, "properties": {}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 0]}, "properties": {}},
            {"type": "Feature", "geometry": null, "properties": {}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.5, 1]}, "properties": {"a": 1}}
        ]
    });

    let GeoJson::FeatureCollection(fc) = processor().delaunay_triangulation(&input).unwrap() else {
        panic!("expected a FeatureCollection");
    };

    assert_eq!(fc.features.len(), 1);
    let feature = &fc.features[0];
    let props = feature.properties.as_ref().unwrap();
    assert_eq!(props.len(), 1);
    assert_eq!(props["processed"], json!(true));

    let geometry = feature.geometry.as_ref().unwrap();
    let GeoValue::GeometryCollection(members) = &geometry.value else {
        panic!("expected the engine to receive a collection");
    };
    assert_eq!(members.len(), 3);
}

#[test]
fn test_feature_collection_single_geometry_is_unwrapped() {
    let input = json!({
        "type": "FeatureCollection",
        "features": [{"type": "Feature", "geometry": square(), "properties": {}}]
    });

    let GeoJson::FeatureCollection(fc) = processor().delaunay_triangulation(&input).unwrap() else {
        panic!("expected a FeatureCollection");
    };
    let geometry = fc.features[0].geometry.as_ref().unwrap();
    assert!(matches!(geometry.value, GeoValue::Polygon(_)));
}

#[test]
fn test_empty_feature_collection() {
    let input = json!({"type": "FeatureCollection", "features": []});
    let err = processor().delaunay_triangulation(&input).unwrap_err();
    assert!(matches!(err, GeoprocError::EmptyFeatureCollection));
    assert!(err.to_string().contains("Empty FeatureCollection"));
}

#[test]
fn test_feature_collection_without_any_geometry() {
    let input = json!({
        "type": "FeatureCollection",
        "features": [{"type": "Feature", "geometry": null, "properties": {}}]
    });
    let err = processor().delaunay_triangulation(&input).unwrap_err();
    assert!(matches!(err, GeoprocError::NoGeometry));
}

#[test]
fn test_feature_without_geometry() {
    let input = json!({"type": "Feature", "properties": {}});
    let err = processor().delaunay_triangulation(&input).unwrap_err();
    assert!(matches!(err, GeoprocError::FeatureWithoutGeometry));
    assert!(err.to_string().contains("no geometry"));
}

#[test]
fn test_empty_geometry_object_counts_as_missing() {
    let input = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {}, "properties": {}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}, "properties": {}}
        ]
    });
    let result = processor().delaunay_triangulation(&input).unwrap();
    let GeoJson::FeatureCollection(fc) = result else {
        panic!("expected a FeatureCollection");
    };
    let geometry = fc.features[0].geometry.as_ref().unwrap();
    assert_eq!(geometry.value, GeoValue::Point(vec![1.0, 2.0]));

    let input = json!({"type": "Feature", "geometry": {}, "properties": {}});
    let err = processor().delaunay_triangulation(&input).unwrap_err();
    assert!(matches!(err, GeoprocError::FeatureWithoutGeometry));
}

#[test]
fn test_invalid_geojson() {
    let err = processor().delaunay_triangulation(&json!({"type": "Blob"})).unwrap_err();
    assert!(matches!(err, GeoprocError::InvalidGeoJson { .. }));

    let err = processor().delaunay_triangulation(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, GeoprocError::InvalidGeoJson { .. }));
}

#[test]
fn test_invalid_geometry_is_rejected_before_the_engine_runs() {
    let input = json!({"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [0, 0]]]});
    let err = processor().straight_skeleton(&input).unwrap_err();
    assert_eq!(err.to_string(), "Invalid input geometry: Too few points in ring");
}

#[test]
fn test_engine_failure_is_surfaced() {
    let input = json!({"type": "Point", "coordinates": [0, 0]});
    let err = processor().straight_skeleton(&input).unwrap_err();
    assert!(matches!(
        err,
        GeoprocError::OperationFailed { operation: Operation::StraightSkeleton, .. }
    ));
    assert_eq!(err.to_string(), "Straight skeleton computation failed: input is not polygonal");
}

#[test]
fn test_invalid_params_rejected() {
    let err = processor()
        .process("offset_polygon", &square(), Some(&json!({"offsetDistance": "far"})))
        .unwrap_err();
    assert!(matches!(err, GeoprocError::InvalidParameter { .. }));
}

#[test]
fn test_process_routes_every_operation() {
    let processor = processor();
    for op in Operation::ALL {
        let result = processor.process(op.as_str(), &square(), None);
        assert!(result.is_ok(), "{} failed: {:?}", op, result);
    }
}

#[test]
fn test_offset_distance_param() {
    let result = processor()
        .process("offset_polygon", &square(), Some(&json!({"offsetDistance": 2.0})))
        .unwrap();
    assert_eq!(point_coords(result), vec![2.0, 0.0]);
}

#[test]
fn test_offset_distance_default() {
    let result = processor().process("offset_polygon", &square(), None).unwrap();
    assert_eq!(point_coords(result), vec![1.0, 0.0]);
}

#[test]
fn test_extrude_height_param_and_default() {
    let result = processor()
        .process("extrude", &square(), Some(&json!({"extrudeHeight": 15.0})))
        .unwrap();
    assert_eq!(point_coords(result), vec![0.0, 0.0, 15.0]);

    let result = processor().process("extrude", &square(), Some(&json!({}))).unwrap();
    assert_eq!(point_coords(result), vec![0.0, 0.0, 10.0]);
}

#[test]
fn test_configured_defaults_apply_to_missing_params() {
    let processor = processor().with_defaults(ProcessingDefaults {
        offset_distance: -0.25,
        extrude_height: 4.0,
        preserve_properties: true,
    });

    let result = processor.process("offset_polygon", &square(), None).unwrap();
    assert_eq!(point_coords(result), vec![-0.25, 0.0]);

    let result = processor.process("extrude", &square(), None).unwrap();
    assert_eq!(point_coords(result), vec![0.0, 0.0, 4.0]);
}

#[test]
fn test_params_for_other_operations_are_ignored() {
    let result = processor()
        .process("triangulate_2dz", &square(), Some(&json!({"offsetDistance": 5.0})))
        .unwrap();
    assert!(matches!(result, GeoJson::Geometry(_)));
}

#[test]
fn test_unread_params_of_any_type_are_ignored() {
    let result = processor()
        .process("triangulate_2dz", &square(), Some(&json!({"offsetDistance": "far"})))
        .unwrap();
    assert!(matches!(result, GeoJson::Geometry(_)));

    let result = processor()
        .process("extrude", &square(), Some(&json!({"offsetDistance": "far", "extrudeHeight": 3})))
        .unwrap();
    assert_eq!(point_coords(result), vec![0.0, 0.0, 3.0]);

    let result = processor().process("straight_skeleton", &square(), Some(&json!([1, 2]))).unwrap();
    assert!(matches!(result, GeoJson::Geometry(_)));
}
